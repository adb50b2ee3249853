#![no_std]

mod crop;
mod error;
mod events;
mod interfaces;
mod ledger;
mod math;
mod reconcile;
mod registry;
mod storage;

pub use error::Error;
pub use math::{BASIS_POINTS, WAD};
pub use storage::{AdapterConfig, CropState, HolderStake, Series};

use crop::Crop;
use ledger::SeriesOps;
use reconcile::Reconciler;
use registry::Registry;
use storage::Storage;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

/// One pooled deposit split into principal and yield positions per
/// maturity, with reward-token inflows shared among active yield holders.
#[contract]
pub struct CropAdapter;

#[contractimpl]
impl CropAdapter {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the adapter
    ///
    /// The adapter must also be registered as an operator on both claim
    /// tokens and as the transfer hook of the yield token.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidConfig`: Fee outside [0, 10,000) or reward token == target
    pub fn initialize(
        env: Env,
        admin: Address,
        oracle: Address,
        target: Address,
        reward_token: Address,
        principal_token: Address,
        yield_token: Address,
        issuance_fee_bps: i128,
    ) -> Result<(), Error> {
        if Storage::has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        if !(0..BASIS_POINTS).contains(&issuance_fee_bps) || reward_token == target {
            return Err(Error::InvalidConfig);
        }

        Storage::set_config(
            &env,
            &AdapterConfig {
                admin,
                oracle,
                target,
                reward_token,
                principal_token,
                yield_token,
                issuance_fee_bps,
            },
        );

        Ok(())
    }

    /// Withdraw retained issuance fees (admin only)
    pub fn withdraw_fees(env: Env, to: Address) -> Result<i128, Error> {
        SeriesOps::withdraw_fees(&env, &to)
    }

    // ============================================
    // SERIES LEDGER
    // ============================================

    /// Deposit target and receive principal and yield tokens 1:1
    pub fn issue(env: Env, holder: Address, maturity: u64, deposit: i128) -> Result<i128, Error> {
        SeriesOps::issue(&env, &holder, maturity, deposit)
    }

    /// Burn matching principal and yield tokens for target
    pub fn combine(env: Env, holder: Address, maturity: u64, amount: i128) -> Result<i128, Error> {
        SeriesOps::combine(&env, &holder, maturity, amount)
    }

    /// Collect the scale growth owed to the holder's yield tokens
    pub fn collect(env: Env, holder: Address, maturity: u64) -> Result<i128, Error> {
        SeriesOps::collect(&env, &holder, maturity)
    }

    /// Redeem principal tokens after settlement
    pub fn redeem_principal(
        env: Env,
        holder: Address,
        maturity: u64,
        amount: i128,
    ) -> Result<i128, Error> {
        SeriesOps::redeem_principal(&env, &holder, maturity, amount)
    }

    /// Freeze the scale of a matured series (callable by anyone)
    pub fn settle_series(env: Env, maturity: u64) -> Result<Series, Error> {
        Registry::settle(&env, maturity)
    }

    /// Retire settled stake out of the reward pool (callable by anyone)
    pub fn reconcile(env: Env, holders: Vec<Address>, maturities: Vec<u64>) -> Result<i128, Error> {
        Reconciler::reconcile(&env, &holders, &maturities)
    }

    /// Transfer hook of the yield-token ledger
    ///
    /// `from_balance` and `to_balance` are the parties' yield balances
    /// before the transfer.
    #[allow(clippy::too_many_arguments)]
    pub fn on_yield_transfer(
        env: Env,
        caller: Address,
        maturity: u64,
        from: Address,
        to: Address,
        amount: i128,
        from_balance: i128,
        to_balance: i128,
    ) -> Result<(), Error> {
        SeriesOps::on_yield_transfer(
            &env,
            &caller,
            maturity,
            &from,
            &to,
            amount,
            from_balance,
            to_balance,
        )
    }

    // ============================================
    // REWARDS
    // ============================================

    /// Settle a holder's rewards without claiming (callable by anyone)
    pub fn checkpoint(env: Env, holder: Address) -> Result<i128, Error> {
        Crop::checkpoint(&env, &holder).map(|stake| stake.owed_reward)
    }

    /// Claim all rewards owed to the holder
    pub fn claim_rewards(env: Env, holder: Address) -> Result<i128, Error> {
        Crop::claim(&env, &holder)
    }

    /// Rewards the holder could claim right now
    pub fn pending_reward(env: Env, holder: Address) -> Result<i128, Error> {
        Crop::pending(&env, &holder)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Stake of the holder still earning rewards
    pub fn active_stake(env: Env, holder: Address) -> i128 {
        Storage::holder_stake(&env, &holder).active
    }

    /// Stake of the holder retired from the reward pool
    pub fn reconciled_stake(env: Env, holder: Address) -> i128 {
        Storage::holder_stake(&env, &holder).reconciled
    }

    /// Rewards credited at the holder's last checkpoint, not yet claimed
    pub fn owed_reward(env: Env, holder: Address) -> i128 {
        Storage::holder_stake(&env, &holder).owed_reward
    }

    /// Full stake record of a holder
    pub fn holder_stake(env: Env, holder: Address) -> HolderStake {
        Storage::holder_stake(&env, &holder)
    }

    /// Sum of every holder's active stake
    pub fn total_active_stake(env: Env) -> i128 {
        Storage::crop_state(&env).total_active_stake
    }

    /// Reward accumulator (WAD per unit of active stake)
    pub fn reward_per_stake(env: Env) -> i128 {
        Storage::crop_state(&env).reward_per_stake
    }

    /// Accumulator state as of the last accrual
    pub fn crop_state(env: Env) -> CropState {
        Storage::crop_state(&env)
    }

    /// Get series details
    pub fn series_info(env: Env, maturity: u64) -> Result<Series, Error> {
        Registry::get(&env, maturity)
    }

    /// Whether the holder has been reconciled for a maturity
    pub fn is_reconciled(env: Env, holder: Address, maturity: u64) -> bool {
        Storage::is_reconciled(&env, &holder, maturity)
    }

    /// Scale up to which the holder's yield on a maturity has been collected
    pub fn collected_scale(env: Env, holder: Address, maturity: u64) -> Option<i128> {
        Storage::collected_scale(&env, &holder, maturity)
    }

    /// Issuance fees retained and not yet withdrawn
    pub fn accrued_fees(env: Env) -> i128 {
        Storage::accrued_fees(&env)
    }

    /// Get adapter configuration
    pub fn get_config(env: Env) -> Result<AdapterConfig, Error> {
        Storage::config(&env)
    }
}
