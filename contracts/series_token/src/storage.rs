use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    Operators(Address),
    TransferHook,
    Balance(u64, Address), // (maturity, holder)
    TotalSupply(u64),
}
