use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScaleUpdatedEvent {
    pub adapter: Address,
    pub previous: i128,
    pub scale: i128,
    pub timestamp: u64,
}
