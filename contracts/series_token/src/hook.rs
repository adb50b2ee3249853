use soroban_sdk::{contractclient, Address, Env};

/// Contract notified before balances of a series move between two holders.
///
/// The crop adapter implements this for its yield-token ledger so both
/// parties' reward checkpoints settle before the balance changes. The hook
/// must not call back into the token, so both parties' balances before the
/// transfer are passed along.
#[contractclient(name = "TransferHookClient")]
pub trait TransferHook {
    fn on_yield_transfer(
        env: Env,
        caller: Address,
        maturity: u64,
        from: Address,
        to: Address,
        amount: i128,
        from_balance: i128,
        to_balance: i128,
    );
}
