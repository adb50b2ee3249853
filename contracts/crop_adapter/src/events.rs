use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct SeriesCreatedEvent {
    pub maturity: u64,
    pub issuance_scale: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct SeriesSettledEvent {
    pub maturity: u64,
    pub settlement_scale: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct IssuedEvent {
    pub maturity: u64,
    pub holder: Address,
    pub deposit: i128,
    pub fee: i128,
    pub principal: i128,
    pub scale: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct CombinedEvent {
    pub maturity: u64,
    pub holder: Address,
    pub amount: i128,
    pub target_out: i128,
    pub collected: i128,
    pub settled: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct YieldCollectedEvent {
    pub maturity: u64,
    pub holder: Address,
    pub amount: i128,
    pub scale: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PrincipalRedeemedEvent {
    pub maturity: u64,
    pub holder: Address,
    pub amount: i128,
    pub target_out: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ReconciledEvent {
    pub maturity: u64,
    pub holder: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct StakeTransferredEvent {
    pub maturity: u64,
    pub from: Address,
    pub to: Address,
    pub amount: i128,
    pub stake_moved: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct RewardsClaimedEvent {
    pub holder: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct FeesWithdrawnEvent {
    pub to: Address,
    pub amount: i128,
}
