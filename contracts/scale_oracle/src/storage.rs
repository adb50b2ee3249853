use soroban_sdk::{contracttype, Address};

/// 1.0 in scale units (18 decimals)
pub const WAD: i128 = 1_000_000_000_000_000_000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScaleRecord {
    /// Underlying units per target unit, WAD based
    pub scale: i128,
    /// Ledger timestamp of the last update
    pub updated_at: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    Scale(Address), // adapter → ScaleRecord
}
