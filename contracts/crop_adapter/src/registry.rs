use crate::error::Error;
use crate::events::{SeriesCreatedEvent, SeriesSettledEvent};
use crate::interfaces::live_scale;
use crate::storage::{AdapterConfig, Series, Storage};
use soroban_sdk::{Address, Env, Symbol};

/// Per-maturity series records.
pub struct Registry;

impl Registry {
    pub fn get(env: &Env, maturity: u64) -> Result<Series, Error> {
        Storage::series(env, maturity).ok_or(Error::SeriesNotFound)
    }

    /// Series for `maturity`, opened at `scale` when this is its first
    /// issuance. The new record is not stored until `record_issuance`.
    pub fn open(env: &Env, config: &AdapterConfig, maturity: u64, scale: i128) -> (Series, bool) {
        match Storage::series(env, maturity) {
            Some(series) => (series, false),
            None => (
                Series {
                    maturity,
                    issuance_scale: scale,
                    settlement_scale: 0,
                    principal_token: config.principal_token.clone(),
                    yield_token: config.yield_token.clone(),
                    total_issued: 0,
                    settled: false,
                },
                true,
            ),
        }
    }

    pub fn record_issuance(
        env: &Env,
        series: &mut Series,
        principal: i128,
        created: bool,
    ) -> Result<(), Error> {
        series.total_issued = series
            .total_issued
            .checked_add(principal)
            .ok_or(Error::ArithmeticOverflow)?;
        Storage::set_series(env, series);

        if created {
            env.events().publish(
                (Symbol::new(env, "series_created"), series.maturity),
                SeriesCreatedEvent {
                    maturity: series.maturity,
                    issuance_scale: series.issuance_scale,
                },
            );
        }

        Ok(())
    }

    /// Freeze the settlement scale of a matured series (callable by anyone)
    ///
    /// # Errors
    /// - `SeriesNotFound`: No issuance for this maturity
    /// - `AlreadySettled`: Series already settled
    /// - `MaturityNotReached`: Ledger time is before maturity
    pub fn settle(env: &Env, maturity: u64) -> Result<Series, Error> {
        let config = Storage::config(env)?;
        let mut series = Self::get(env, maturity)?;

        if series.settled {
            return Err(Error::AlreadySettled);
        }

        if env.ledger().timestamp() < series.maturity {
            return Err(Error::MaturityNotReached);
        }

        series.settlement_scale = live_scale(env, &config)?;
        series.settled = true;
        Storage::set_series(env, &series);

        env.events().publish(
            (Symbol::new(env, "series_settled"), maturity),
            SeriesSettledEvent {
                maturity,
                settlement_scale: series.settlement_scale,
            },
        );

        Ok(series)
    }

    /// Scale used to turn claim tokens of `series` back into target:
    /// frozen once settled, live before.
    pub fn exit_scale(env: &Env, config: &AdapterConfig, series: &Series) -> Result<i128, Error> {
        if series.settled {
            Ok(series.settlement_scale)
        } else {
            live_scale(env, config)
        }
    }

    /// Scale at which `holder`'s yield tokens of `series` convert back to
    /// stake: where their yield was last collected, or where they entered.
    pub fn position_scale(env: &Env, holder: &Address, series: &Series) -> i128 {
        Storage::collected_scale(env, holder, series.maturity).unwrap_or(series.issuance_scale)
    }
}
