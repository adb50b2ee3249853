#![no_std]

mod error;
mod events;
mod storage;

pub use error::Error;
pub use storage::{ScaleRecord, WAD};

use events::ScaleUpdatedEvent;
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, log, Address, Env, Symbol};

/// Publishes the exchange rate ("scale") between each adapter's pooled
/// deposit and its unit of account.
#[contract]
pub struct ScaleOracle;

#[contractimpl]
impl ScaleOracle {
    /// Initialize the oracle
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);

        Ok(())
    }

    /// Publish a new scale for an adapter (admin only)
    ///
    /// Scales are expected to be non-decreasing. A decrease is still
    /// accepted so a loss in the underlying market can be reported, but it
    /// is logged.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidScale`: scale <= 0
    pub fn set_scale(env: Env, adapter: Address, scale: i128) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        if scale <= 0 {
            return Err(Error::InvalidScale);
        }

        let key = DataKey::Scale(adapter.clone());
        let previous = env
            .storage()
            .persistent()
            .get::<DataKey, ScaleRecord>(&key)
            .map(|record| record.scale)
            .unwrap_or(0);

        if scale < previous {
            log!(&env, "scale decreased", adapter, previous, scale);
        }

        let timestamp = env.ledger().timestamp();
        env.storage().persistent().set(
            &key,
            &ScaleRecord {
                scale,
                updated_at: timestamp,
            },
        );

        env.events().publish(
            (Symbol::new(&env, "scale_updated"), adapter.clone()),
            ScaleUpdatedEvent {
                adapter,
                previous,
                scale,
                timestamp,
            },
        );

        Ok(())
    }

    /// Current scale for an adapter
    ///
    /// # Errors
    /// - `ScaleNotSet`: No scale published for this adapter
    pub fn scale(env: Env, adapter: Address) -> Result<i128, Error> {
        env.storage()
            .persistent()
            .get::<DataKey, ScaleRecord>(&DataKey::Scale(adapter))
            .map(|record| record.scale)
            .ok_or(Error::ScaleNotSet)
    }

    /// Timestamp of the last scale update for an adapter
    pub fn last_updated(env: Env, adapter: Address) -> Option<u64> {
        env.storage()
            .persistent()
            .get::<DataKey, ScaleRecord>(&DataKey::Scale(adapter))
            .map(|record| record.updated_at)
    }
}
