//! Reward accrual engine.
//!
//! One accumulator per adapter converts reward-token inflows into a reward
//! per unit of active stake. Each holder keeps a checkpoint of the
//! accumulator at their last settlement, so a holder's entitlement is
//! `active × (accumulator − checkpoint)` without iterating other holders.
//!
//! Inflows observed while no stake is active are not folded in: they stay
//! above `last_reward_balance` and go to whoever is staked at the next
//! update that runs with non-zero stake.

use crate::error::Error;
use crate::events::RewardsClaimedEvent;
use crate::math;
use crate::storage::{AdapterConfig, CropState, HolderStake, Storage};
use soroban_sdk::{log, token, Address, Env, Symbol};

pub struct Crop;

impl Crop {
    /// Fold the adapter's current reward balance into the accumulator.
    ///
    /// Returns the inflow distributed by this call.
    pub fn fold(state: &mut CropState, reward_balance: i128) -> Result<i128, Error> {
        if state.total_active_stake == 0 {
            return Ok(0);
        }

        let inflow = reward_balance
            .checked_sub(state.last_reward_balance)
            .ok_or(Error::ArithmeticOverflow)?;

        if inflow > 0 {
            let delta = math::reward_per_stake(inflow, state.total_active_stake)
                .ok_or(Error::ArithmeticOverflow)?;
            state.reward_per_stake = state
                .reward_per_stake
                .checked_add(delta)
                .ok_or(Error::ArithmeticOverflow)?;
        }
        state.last_reward_balance = reward_balance;

        Ok(inflow.max(0))
    }

    /// Credit a holder with everything earned since their checkpoint.
    pub fn settle_holder(state: &CropState, stake: &mut HolderStake) -> Result<i128, Error> {
        let owed = math::accrued_reward(
            stake.active,
            state.reward_per_stake,
            stake.reward_checkpoint,
        )
        .ok_or(Error::ArithmeticOverflow)?;

        stake.owed_reward = stake
            .owed_reward
            .checked_add(owed)
            .ok_or(Error::ArithmeticOverflow)?;
        stake.reward_checkpoint = state.reward_per_stake;

        Ok(owed)
    }

    /// Observe inflows, then settle `holder`. Must run before any change to
    /// the holder's active stake.
    pub fn accrue(
        env: &Env,
        config: &AdapterConfig,
        state: &mut CropState,
        holder: &Address,
        stake: &mut HolderStake,
    ) -> Result<(), Error> {
        let balance = Self::reward_balance(env, config);
        let inflow = Self::fold(state, balance)?;
        if inflow > 0 {
            log!(env, "crop: inflow folded", inflow, state.reward_per_stake);
        }

        let owed = Self::settle_holder(state, stake)?;
        if owed > 0 {
            log!(env, "crop: holder credited", holder.clone(), owed);
        }

        Ok(())
    }

    /// Add stake to the active pool.
    pub fn join(state: &mut CropState, stake: &mut HolderStake, amount: i128) -> Result<(), Error> {
        stake.active = stake
            .active
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        state.total_active_stake = state
            .total_active_stake
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(())
    }

    /// Remove up to `amount` of active stake. Returns what was removed.
    pub fn leave(state: &mut CropState, stake: &mut HolderStake, amount: i128) -> i128 {
        let removed = amount.min(stake.active).max(0);
        stake.active -= removed;
        state.total_active_stake -= removed;
        removed
    }

    /// Remove up to `amount` of stake tied to one series.
    ///
    /// A (holder, series) pair that has been reconciled holds its stake in
    /// the reconciled bucket; every other pair holds it in the active pool.
    /// Returns what was removed.
    pub fn exit(
        state: &mut CropState,
        stake: &mut HolderStake,
        amount: i128,
        reconciled: bool,
    ) -> i128 {
        if !reconciled {
            return Self::leave(state, stake, amount);
        }

        let removed = amount.min(stake.reconciled).max(0);
        stake.reconciled -= removed;
        removed
    }

    /// Add stake tied to one series to the bucket `exit` would draw from.
    pub fn enter(
        state: &mut CropState,
        stake: &mut HolderStake,
        amount: i128,
        reconciled: bool,
    ) -> Result<(), Error> {
        if !reconciled {
            return Self::join(state, stake, amount);
        }

        stake.reconciled = stake
            .reconciled
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(())
    }

    /// Move up to `amount` of active stake into the reconciled bucket.
    pub fn retire(state: &mut CropState, stake: &mut HolderStake, amount: i128) -> Result<i128, Error> {
        let moved = Self::leave(state, stake, amount);
        stake.reconciled = stake
            .reconciled
            .checked_add(moved)
            .ok_or(Error::ArithmeticOverflow)?;
        Ok(moved)
    }

    /// Run the accrual step for `holder` and persist it.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn checkpoint(env: &Env, holder: &Address) -> Result<HolderStake, Error> {
        let config = Storage::config(env)?;
        let mut state = Storage::crop_state(env);
        let mut stake = Storage::holder_stake(env, holder);

        Self::accrue(env, &config, &mut state, holder, &mut stake)?;

        Storage::set_crop_state(env, &state);
        Storage::set_holder_stake(env, holder, &stake);

        Ok(stake)
    }

    /// Settle and pay out everything owed to `holder`.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn claim(env: &Env, holder: &Address) -> Result<i128, Error> {
        holder.require_auth();

        let config = Storage::config(env)?;
        let mut state = Storage::crop_state(env);
        let mut stake = Storage::holder_stake(env, holder);

        Self::accrue(env, &config, &mut state, holder, &mut stake)?;

        let amount = stake.owed_reward;
        if amount > 0 {
            stake.owed_reward = 0;
            // the payout leaves the observed balance, not the accumulator
            state.last_reward_balance = state
                .last_reward_balance
                .checked_sub(amount)
                .ok_or(Error::ArithmeticOverflow)?;
        }

        Storage::set_crop_state(env, &state);
        Storage::set_holder_stake(env, holder, &stake);

        if amount > 0 {
            token::Client::new(env, &config.reward_token).transfer(
                &env.current_contract_address(),
                holder,
                &amount,
            );

            env.events().publish(
                (Symbol::new(env, "rewards_claimed"), holder.clone()),
                RewardsClaimedEvent {
                    holder: holder.clone(),
                    amount,
                },
            );
        }

        Ok(amount)
    }

    /// What `holder` would be owed if the accrual step ran now.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn pending(env: &Env, holder: &Address) -> Result<i128, Error> {
        let config = Storage::config(env)?;
        let mut state = Storage::crop_state(env);
        let mut stake = Storage::holder_stake(env, holder);

        Self::fold(&mut state, Self::reward_balance(env, &config))?;
        Self::settle_holder(&state, &mut stake)?;

        Ok(stake.owed_reward)
    }

    fn reward_balance(env: &Env, config: &AdapterConfig) -> i128 {
        token::Client::new(env, &config.reward_token).balance(&env.current_contract_address())
    }
}
