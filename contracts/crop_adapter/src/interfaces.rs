use crate::error::Error;
use crate::storage::AdapterConfig;
use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "OracleClient")]
pub trait ScaleOracleInterface {
    fn scale(env: Env, adapter: Address) -> i128;
}

/// Principal and yield ledgers share this interface; the adapter is a
/// registered operator on both.
#[contractclient(name = "ClaimTokenClient")]
pub trait ClaimTokenInterface {
    fn mint(env: Env, operator: Address, maturity: u64, to: Address, amount: i128);
    fn burn(env: Env, operator: Address, maturity: u64, from: Address, amount: i128);
    fn balance_of(env: Env, maturity: u64, holder: Address) -> i128;
}

/// Live scale for this adapter
pub fn live_scale(env: &Env, config: &AdapterConfig) -> Result<i128, Error> {
    let scale = OracleClient::new(env, &config.oracle).scale(&env.current_contract_address());
    if scale <= 0 {
        return Err(Error::InvalidScale);
    }
    Ok(scale)
}
