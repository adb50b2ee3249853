use crate::error::Error;
use soroban_sdk::{contracttype, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdapterConfig {
    pub admin: Address,
    /// Publishes `scale(adapter)`
    pub oracle: Address,
    /// Yield-bearing deposit token
    pub target: Address,
    /// Airdropped reward token
    pub reward_token: Address,
    /// Series token instance holding principal positions
    pub principal_token: Address,
    /// Series token instance holding yield positions
    pub yield_token: Address,
    /// Issuance fee in basis points
    pub issuance_fee_bps: i128,
}

/// Adapter-wide reward accumulator.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CropState {
    /// Sum of every holder's active stake (target units)
    pub total_active_stake: i128,
    /// Reward per unit of active stake, WAD based
    pub reward_per_stake: i128,
    /// Reward balance already folded into `reward_per_stake`
    pub last_reward_balance: i128,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HolderStake {
    /// Stake still earning rewards (target units)
    pub active: i128,
    /// Stake moved out of the pool after settlement
    pub reconciled: i128,
    /// `reward_per_stake` at the last settlement of this holder
    pub reward_checkpoint: i128,
    /// Distributed but unclaimed reward
    pub owed_reward: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Series {
    pub maturity: u64,
    /// Scale at first issuance, immutable
    pub issuance_scale: i128,
    /// Scale frozen at settlement, 0 until then
    pub settlement_scale: i128,
    pub principal_token: Address,
    pub yield_token: Address,
    /// Cumulative principal units minted
    pub total_issued: i128,
    pub settled: bool,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Crop,
    AccruedFees,
    Stake(Address),
    Series(u64),
    Reconciled(Address, u64),     // (holder, maturity)
    CollectedScale(Address, u64), // (holder, maturity)
}

pub struct Storage;

impl Storage {
    // Config
    pub fn has_config(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Config)
    }

    pub fn config(env: &Env) -> Result<AdapterConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_config(env: &Env, config: &AdapterConfig) {
        env.storage().instance().set(&DataKey::Config, config);
    }

    // Accumulator
    pub fn crop_state(env: &Env) -> CropState {
        env.storage()
            .instance()
            .get(&DataKey::Crop)
            .unwrap_or_default()
    }

    pub fn set_crop_state(env: &Env, state: &CropState) {
        env.storage().instance().set(&DataKey::Crop, state);
    }

    pub fn accrued_fees(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::AccruedFees)
            .unwrap_or(0)
    }

    pub fn set_accrued_fees(env: &Env, amount: i128) {
        env.storage().instance().set(&DataKey::AccruedFees, &amount);
    }

    // Holder stake
    pub fn holder_stake(env: &Env, holder: &Address) -> HolderStake {
        env.storage()
            .persistent()
            .get(&DataKey::Stake(holder.clone()))
            .unwrap_or_default()
    }

    pub fn set_holder_stake(env: &Env, holder: &Address, stake: &HolderStake) {
        env.storage()
            .persistent()
            .set(&DataKey::Stake(holder.clone()), stake);
    }

    // Series
    pub fn series(env: &Env, maturity: u64) -> Option<Series> {
        env.storage().persistent().get(&DataKey::Series(maturity))
    }

    pub fn set_series(env: &Env, series: &Series) {
        env.storage()
            .persistent()
            .set(&DataKey::Series(series.maturity), series);
    }

    // Reconciliation marks
    pub fn is_reconciled(env: &Env, holder: &Address, maturity: u64) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::Reconciled(holder.clone(), maturity))
            .unwrap_or(false)
    }

    pub fn set_reconciled(env: &Env, holder: &Address, maturity: u64) {
        env.storage()
            .persistent()
            .set(&DataKey::Reconciled(holder.clone(), maturity), &true);
    }

    // Scale up to which a holder's yield on a series has been collected
    pub fn collected_scale(env: &Env, holder: &Address, maturity: u64) -> Option<i128> {
        env.storage()
            .persistent()
            .get(&DataKey::CollectedScale(holder.clone(), maturity))
    }

    pub fn set_collected_scale(env: &Env, holder: &Address, maturity: u64, scale: i128) {
        env.storage()
            .persistent()
            .set(&DataKey::CollectedScale(holder.clone(), maturity), &scale);
    }
}
