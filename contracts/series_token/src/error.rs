use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Setup
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Minting and burning
    NotOperator = 10,

    // Balances
    InvalidAmount = 20,
    InsufficientBalance = 21,
    BalanceOverflow = 22,
}
