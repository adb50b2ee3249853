use crate::crop::Crop;
use crate::error::Error;
use crate::events::ReconciledEvent;
use crate::interfaces::ClaimTokenClient;
use crate::math;
use crate::registry::Registry;
use crate::storage::Storage;
use soroban_sdk::{log, Address, Env, Symbol, Vec};

/// Retires stake of settled series out of the reward pool.
///
/// Stake is only tracked per holder, not per holder and series, so the
/// amount attributed to a series is the holder's yield balance at their
/// position scale for it, capped by their active stake. Rounding dust can
/// still cross between series of the same holder.
pub struct Reconciler;

impl Reconciler {
    /// Reconcile every holder against every maturity (callable by anyone)
    ///
    /// Unsettled series are skipped; pairs already reconciled are left
    /// untouched.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `SeriesNotFound`: A maturity has no issuance
    pub fn reconcile(env: &Env, holders: &Vec<Address>, maturities: &Vec<u64>) -> Result<i128, Error> {
        let config = Storage::config(env)?;

        let mut settled = Vec::new(env);
        for maturity in maturities.iter() {
            let series = Registry::get(env, maturity)?;
            if series.settled {
                settled.push_back(series);
            }
        }

        let mut state = Storage::crop_state(env);
        let mut total_moved: i128 = 0;

        for holder in holders.iter() {
            for series in settled.iter() {
                let maturity = series.maturity;
                if Storage::is_reconciled(env, &holder, maturity) {
                    continue;
                }

                let balance =
                    ClaimTokenClient::new(env, &series.yield_token).balance_of(&maturity, &holder);
                let attributable =
                    math::target_units(balance, Registry::position_scale(env, &holder, &series))
                        .ok_or(Error::ArithmeticOverflow)?;

                let mut stake = Storage::holder_stake(env, &holder);
                Crop::accrue(env, &config, &mut state, &holder, &mut stake)?;
                let moved = Crop::retire(&mut state, &mut stake, attributable)?;

                Storage::set_holder_stake(env, &holder, &stake);
                Storage::set_reconciled(env, &holder, maturity);

                if moved > 0 {
                    log!(env, "reconcile: stake retired", holder.clone(), maturity, moved);
                    env.events().publish(
                        (Symbol::new(env, "reconciled"), maturity, holder.clone()),
                        ReconciledEvent {
                            maturity,
                            holder: holder.clone(),
                            amount: moved,
                        },
                    );
                }

                total_moved = total_moved
                    .checked_add(moved)
                    .ok_or(Error::ArithmeticOverflow)?;
            }
        }

        Storage::set_crop_state(env, &state);
        Ok(total_moved)
    }
}
