use crate::crop::Crop;
use crate::error::Error;
use crate::events::{
    CombinedEvent, FeesWithdrawnEvent, IssuedEvent, PrincipalRedeemedEvent, StakeTransferredEvent,
    YieldCollectedEvent,
};
use crate::interfaces::{live_scale, ClaimTokenClient};
use crate::math;
use crate::registry::Registry;
use crate::storage::{AdapterConfig, CropState, HolderStake, Series, Storage};
use soroban_sdk::{log, token, Address, Env, Symbol};

/// Issue, combine, collect and redeem. Every path accrues rewards for the
/// holder before touching their stake and commits ledger state before any
/// token moves.
///
/// A holder's yield tokens of a series are worth `yield × WAD / scale` of
/// stake, at the scale their yield was last collected. Collecting pays the
/// scale growth since then in target and takes it out of stake, so exits
/// always debit exactly the stake the position still carries.
pub struct SeriesOps;

impl SeriesOps {
    /// Deposit target into a series
    ///
    /// # Errors
    /// - `InvalidAmount`: deposit <= 0
    /// - `InvalidMaturity`: maturity is not in the future
    /// - `InsufficientDeposit`: deposit rounds to zero principal units
    pub fn issue(env: &Env, holder: &Address, maturity: u64, deposit: i128) -> Result<i128, Error> {
        if deposit <= 0 {
            return Err(Error::InvalidAmount);
        }

        holder.require_auth();

        let config = Storage::config(env)?;

        if maturity <= env.ledger().timestamp() {
            return Err(Error::InvalidMaturity);
        }

        let scale = live_scale(env, &config)?;
        let fee = math::issuance_fee(deposit, config.issuance_fee_bps)
            .ok_or(Error::ArithmeticOverflow)?;
        let net = deposit - fee;
        let principal = math::principal_units(net, scale).ok_or(Error::ArithmeticOverflow)?;
        // stake carried by the minted yield, at most `net`
        let units = math::target_units(principal, scale).ok_or(Error::ArithmeticOverflow)?;
        if principal == 0 || units == 0 {
            return Err(Error::InsufficientDeposit);
        }

        let (mut series, created) = Registry::open(env, &config, maturity, scale);
        let held = ClaimTokenClient::new(env, &series.yield_token).balance_of(&maturity, holder);

        let mut state = Storage::crop_state(env);
        let mut stake = Storage::holder_stake(env, holder);
        Crop::accrue(env, &config, &mut state, holder, &mut stake)?;
        Crop::join(&mut state, &mut stake, units)?;
        Self::merge_position(env, holder, &series, held, principal, units, scale)?;

        let fees = Storage::accrued_fees(env)
            .checked_add(fee)
            .ok_or(Error::ArithmeticOverflow)?;

        Registry::record_issuance(env, &mut series, principal, created)?;
        Storage::set_crop_state(env, &state);
        Storage::set_holder_stake(env, holder, &stake);
        Storage::set_accrued_fees(env, fees);

        let this = env.current_contract_address();
        token::Client::new(env, &config.target).transfer(holder, &this, &deposit);
        ClaimTokenClient::new(env, &series.principal_token).mint(&this, &maturity, holder, &principal);
        ClaimTokenClient::new(env, &series.yield_token).mint(&this, &maturity, holder, &principal);

        env.events().publish(
            (Symbol::new(env, "issued"), maturity, holder.clone()),
            IssuedEvent {
                maturity,
                holder: holder.clone(),
                deposit,
                fee,
                principal,
                scale,
            },
        );

        Ok(principal)
    }

    /// Pay the holder the scale growth on their yield tokens since it was
    /// last collected
    ///
    /// Settled series collect up to the settlement scale, open series up to
    /// the live scale.
    ///
    /// # Errors
    /// - `SeriesNotFound`: No issuance for this maturity
    pub fn collect(env: &Env, holder: &Address, maturity: u64) -> Result<i128, Error> {
        holder.require_auth();

        let config = Storage::config(env)?;
        let series = Registry::get(env, maturity)?;
        let held = ClaimTokenClient::new(env, &series.yield_token).balance_of(&maturity, holder);
        let scale = Registry::exit_scale(env, &config, &series)?;

        let mut state = Storage::crop_state(env);
        let mut stake = Storage::holder_stake(env, holder);
        Crop::accrue(env, &config, &mut state, holder, &mut stake)?;
        let collected = Self::harvest(env, &mut state, &mut stake, holder, &series, held, scale)?;

        Storage::set_crop_state(env, &state);
        Storage::set_holder_stake(env, holder, &stake);

        Self::pay_yield(env, &config, holder, maturity, collected, scale);

        Ok(collected)
    }

    /// Burn equal principal and yield amounts to take target back out
    ///
    /// Pending yield on the holder's whole yield balance is collected first
    /// and paid along with the burned amount.
    ///
    /// # Errors
    /// - `InvalidAmount`: amount <= 0
    /// - `SeriesNotFound`: No issuance for this maturity
    /// - `InsufficientStake`: Holder lacks principal or yield tokens
    pub fn combine(env: &Env, holder: &Address, maturity: u64, amount: i128) -> Result<i128, Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        holder.require_auth();

        let config = Storage::config(env)?;
        let series = Registry::get(env, maturity)?;

        let principal_token = ClaimTokenClient::new(env, &series.principal_token);
        let yield_token = ClaimTokenClient::new(env, &series.yield_token);
        let held = yield_token.balance_of(&maturity, holder);
        if principal_token.balance_of(&maturity, holder) < amount || held < amount {
            return Err(Error::InsufficientStake);
        }

        let scale = Registry::exit_scale(env, &config, &series)?;
        let target_out = math::target_units(amount, scale).ok_or(Error::ArithmeticOverflow)?;

        let mut state = Storage::crop_state(env);
        let mut stake = Storage::holder_stake(env, holder);
        Crop::accrue(env, &config, &mut state, holder, &mut stake)?;
        let collected = Self::harvest(env, &mut state, &mut stake, holder, &series, held, scale)?;

        let units = math::target_units(amount, Registry::position_scale(env, holder, &series))
            .ok_or(Error::ArithmeticOverflow)?;
        Crop::exit(
            &mut state,
            &mut stake,
            units,
            Storage::is_reconciled(env, holder, maturity),
        );

        Storage::set_crop_state(env, &state);
        Storage::set_holder_stake(env, holder, &stake);

        let this = env.current_contract_address();
        principal_token.burn(&this, &maturity, holder, &amount);
        yield_token.burn(&this, &maturity, holder, &amount);
        let payout = target_out
            .checked_add(collected)
            .ok_or(Error::ArithmeticOverflow)?;
        if payout > 0 {
            token::Client::new(env, &config.target).transfer(&this, holder, &payout);
        }

        env.events().publish(
            (Symbol::new(env, "combined"), maturity, holder.clone()),
            CombinedEvent {
                maturity,
                holder: holder.clone(),
                amount,
                target_out,
                collected,
                settled: series.settled,
            },
        );

        Ok(payout)
    }

    /// Redeem principal tokens of a settled series at the settlement scale
    ///
    /// # Errors
    /// - `InvalidAmount`: amount <= 0
    /// - `SeriesNotFound`: No issuance for this maturity
    /// - `SeriesNotSettled`: Series not settled yet
    /// - `InsufficientStake`: Holder lacks principal tokens
    pub fn redeem_principal(
        env: &Env,
        holder: &Address,
        maturity: u64,
        amount: i128,
    ) -> Result<i128, Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        holder.require_auth();

        let config = Storage::config(env)?;
        let series = Registry::get(env, maturity)?;

        if !series.settled {
            return Err(Error::SeriesNotSettled);
        }

        let principal_token = ClaimTokenClient::new(env, &series.principal_token);
        if principal_token.balance_of(&maturity, holder) < amount {
            return Err(Error::InsufficientStake);
        }

        let target_out = math::target_units(amount, series.settlement_scale)
            .ok_or(Error::ArithmeticOverflow)?;

        let this = env.current_contract_address();
        principal_token.burn(&this, &maturity, holder, &amount);
        if target_out > 0 {
            token::Client::new(env, &config.target).transfer(&this, holder, &target_out);
        }

        env.events().publish(
            (Symbol::new(env, "principal_redeemed"), maturity, holder.clone()),
            PrincipalRedeemedEvent {
                maturity,
                holder: holder.clone(),
                amount,
                target_out,
            },
        );

        Ok(target_out)
    }

    /// Move stake along with a yield-token transfer, before balances change
    ///
    /// Both parties collect their pending yield first, so the moved tokens
    /// carry stake at the sender's collection scale.
    ///
    /// # Errors
    /// - `UntrustedCaller`: Caller is not this adapter's yield-token ledger
    /// - `InvalidAmount`: amount <= 0
    /// - `SeriesNotFound`: No issuance for this maturity
    #[allow(clippy::too_many_arguments)]
    pub fn on_yield_transfer(
        env: &Env,
        caller: &Address,
        maturity: u64,
        from: &Address,
        to: &Address,
        amount: i128,
        from_balance: i128,
        to_balance: i128,
    ) -> Result<(), Error> {
        let config = Storage::config(env)?;
        if *caller != config.yield_token {
            return Err(Error::UntrustedCaller);
        }
        caller.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let series = Registry::get(env, maturity)?;
        let mut state = Storage::crop_state(env);

        if from == to {
            let mut stake = Storage::holder_stake(env, from);
            Crop::accrue(env, &config, &mut state, from, &mut stake)?;
            Storage::set_crop_state(env, &state);
            Storage::set_holder_stake(env, from, &stake);
            return Ok(());
        }

        let scale = Registry::exit_scale(env, &config, &series)?;
        let mut sender = Storage::holder_stake(env, from);
        let mut receiver = Storage::holder_stake(env, to);
        Crop::accrue(env, &config, &mut state, from, &mut sender)?;
        Crop::accrue(env, &config, &mut state, to, &mut receiver)?;
        let from_collected =
            Self::harvest(env, &mut state, &mut sender, from, &series, from_balance, scale)?;
        let to_collected =
            Self::harvest(env, &mut state, &mut receiver, to, &series, to_balance, scale)?;

        let from_scale = Registry::position_scale(env, from, &series);
        let units = math::target_units(amount, from_scale).ok_or(Error::ArithmeticOverflow)?;
        let moved = Crop::exit(
            &mut state,
            &mut sender,
            units,
            Storage::is_reconciled(env, from, maturity),
        );
        Crop::enter(
            &mut state,
            &mut receiver,
            moved,
            Storage::is_reconciled(env, to, maturity),
        )?;
        Self::merge_position(env, to, &series, to_balance, amount, moved, from_scale)?;

        Storage::set_crop_state(env, &state);
        Storage::set_holder_stake(env, from, &sender);
        Storage::set_holder_stake(env, to, &receiver);

        Self::pay_yield(env, &config, from, maturity, from_collected, scale);
        Self::pay_yield(env, &config, to, maturity, to_collected, scale);

        env.events().publish(
            (Symbol::new(env, "stake_transferred"), maturity),
            StakeTransferredEvent {
                maturity,
                from: from.clone(),
                to: to.clone(),
                amount,
                stake_moved: moved,
            },
        );

        Ok(())
    }

    /// Send retained issuance fees to `to` (admin only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn withdraw_fees(env: &Env, to: &Address) -> Result<i128, Error> {
        let config: AdapterConfig = Storage::config(env)?;
        config.admin.require_auth();

        let amount = Storage::accrued_fees(env);
        if amount == 0 {
            return Ok(0);
        }

        Storage::set_accrued_fees(env, 0);
        token::Client::new(env, &config.target).transfer(
            &env.current_contract_address(),
            to,
            &amount,
        );

        env.events().publish(
            (Symbol::new(env, "fees_withdrawn"), to.clone()),
            FeesWithdrawnEvent {
                to: to.clone(),
                amount,
            },
        );

        Ok(amount)
    }

    /// Take the growth from the holder's collection scale up to `scale` out
    /// of their stake and record `scale` as collected. Returns the target
    /// owed; the caller pays it once state is committed.
    fn harvest(
        env: &Env,
        state: &mut CropState,
        stake: &mut HolderStake,
        holder: &Address,
        series: &Series,
        held: i128,
        scale: i128,
    ) -> Result<i128, Error> {
        let last = match Storage::collected_scale(env, holder, series.maturity) {
            Some(last) if held > 0 && scale > last => last,
            _ => return Ok(0),
        };

        let surplus = math::yield_surplus(held, last, scale).ok_or(Error::ArithmeticOverflow)?;
        let collected = Crop::exit(
            state,
            stake,
            surplus,
            Storage::is_reconciled(env, holder, series.maturity),
        );
        Storage::set_collected_scale(env, holder, series.maturity, scale);

        if collected > 0 {
            log!(env, "ledger: yield harvested", holder.clone(), series.maturity, collected);
        }

        Ok(collected)
    }

    /// Fold `added` yield carrying `added_units` of stake into a position of
    /// `held` yield, keeping one collection scale per holder and series.
    fn merge_position(
        env: &Env,
        holder: &Address,
        series: &Series,
        held: i128,
        added: i128,
        added_units: i128,
        added_scale: i128,
    ) -> Result<(), Error> {
        let held_units = match Storage::collected_scale(env, holder, series.maturity) {
            Some(last) if held > 0 => math::target_units(held, last).ok_or(Error::ArithmeticOverflow)?,
            _ => 0,
        };

        let units = held_units
            .checked_add(added_units)
            .ok_or(Error::ArithmeticOverflow)?;
        let scale = if units > 0 {
            let total = held.checked_add(added).ok_or(Error::ArithmeticOverflow)?;
            math::merged_scale(total, units).ok_or(Error::ArithmeticOverflow)?
        } else {
            added_scale
        };

        Storage::set_collected_scale(env, holder, series.maturity, scale);
        Ok(())
    }

    fn pay_yield(
        env: &Env,
        config: &AdapterConfig,
        holder: &Address,
        maturity: u64,
        amount: i128,
        scale: i128,
    ) {
        if amount <= 0 {
            return;
        }

        token::Client::new(env, &config.target).transfer(
            &env.current_contract_address(),
            holder,
            &amount,
        );

        env.events().publish(
            (Symbol::new(env, "yield_collected"), maturity, holder.clone()),
            YieldCollectedEvent {
                maturity,
                holder: holder.clone(),
                amount,
                scale,
            },
        );
    }
}
