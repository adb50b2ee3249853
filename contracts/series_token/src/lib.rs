#![no_std]

mod error;
mod events;
mod hook;
mod storage;

pub use error::Error;
pub use hook::{TransferHook, TransferHookClient};

use events::{BurnEvent, MintEvent, TransferEvent};
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

/// Multi-series claim token: one fungible ledger per maturity.
///
/// An adapter deploys two instances, one holding principal positions and
/// one holding yield positions. Only the yield instance carries a transfer
/// hook.
#[contract]
pub struct SeriesToken;

#[contractimpl]
impl SeriesToken {
    /// Initialize the token contract
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

    /// Add an operator (the adapter that issues this token)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn add_operator(env: Env, operator: Address) -> Result<(), Error> {
        Self::admin(&env)?.require_auth();

        env.storage()
            .instance()
            .set(&DataKey::Operators(operator), &true);

        Ok(())
    }

    /// Remove an operator
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn remove_operator(env: Env, operator: Address) -> Result<(), Error> {
        Self::admin(&env)?.require_auth();

        env.storage()
            .instance()
            .remove(&DataKey::Operators(operator));

        Ok(())
    }

    /// Route every holder-to-holder transfer through `hook` first
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn set_transfer_hook(env: Env, hook: Address) -> Result<(), Error> {
        Self::admin(&env)?.require_auth();

        env.storage().instance().set(&DataKey::TransferHook, &hook);

        Ok(())
    }

    /// Mint tokens (operators only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `NotOperator`: Caller is not a registered operator
    pub fn mint(
        env: Env,
        operator: Address,
        maturity: u64,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::check_operator(&env, &operator)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let balance = Self::balance_of(env.clone(), maturity, to.clone());
        let new_balance = balance.checked_add(amount).ok_or(Error::BalanceOverflow)?;
        let supply = Self::total_supply(env.clone(), maturity);
        let new_supply = supply.checked_add(amount).ok_or(Error::BalanceOverflow)?;

        Self::write_balance(&env, maturity, &to, new_balance);
        env.storage()
            .persistent()
            .set(&DataKey::TotalSupply(maturity), &new_supply);

        env.events().publish(
            (Symbol::new(&env, "mint"), maturity),
            MintEvent {
                maturity,
                to,
                amount,
            },
        );

        Ok(())
    }

    /// Burn tokens (operators only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `NotOperator`: Caller is not a registered operator
    /// - `InsufficientBalance`: Not enough balance
    pub fn burn(
        env: Env,
        operator: Address,
        maturity: u64,
        from: Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::check_operator(&env, &operator)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let balance = Self::balance_of(env.clone(), maturity, from.clone());
        if balance < amount {
            return Err(Error::InsufficientBalance);
        }

        let supply = Self::total_supply(env.clone(), maturity);

        Self::write_balance(&env, maturity, &from, balance - amount);
        env.storage()
            .persistent()
            .set(&DataKey::TotalSupply(maturity), &(supply - amount));

        env.events().publish(
            (Symbol::new(&env, "burn"), maturity),
            BurnEvent {
                maturity,
                from,
                amount,
            },
        );

        Ok(())
    }

    /// Transfer tokens between holders
    ///
    /// When a transfer hook is configured it is invoked before any balance
    /// moves; a failing hook aborts the transfer.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Not enough balance
    pub fn transfer(
        env: Env,
        maturity: u64,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        let from_balance = Self::balance_of(env.clone(), maturity, from.clone());
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }

        let to_balance = Self::balance_of(env.clone(), maturity, to.clone());

        if let Some(hook) = Self::transfer_hook(env.clone()) {
            TransferHookClient::new(&env, &hook).on_yield_transfer(
                &env.current_contract_address(),
                &maturity,
                &from,
                &to,
                &amount,
                &from_balance,
                &to_balance,
            );
        }

        if from != to {
            let new_to_balance = to_balance
                .checked_add(amount)
                .ok_or(Error::BalanceOverflow)?;

            Self::write_balance(&env, maturity, &from, from_balance - amount);
            Self::write_balance(&env, maturity, &to, new_to_balance);
        }

        env.events().publish(
            (Symbol::new(&env, "transfer"), maturity),
            TransferEvent {
                maturity,
                from,
                to,
                amount,
            },
        );

        Ok(())
    }

    /// Balance of a holder in a series
    pub fn balance_of(env: Env, maturity: u64, holder: Address) -> i128 {
        env.storage()
            .persistent()
            .get::<DataKey, i128>(&DataKey::Balance(maturity, holder))
            .unwrap_or(0)
    }

    /// Outstanding supply of a series
    pub fn total_supply(env: Env, maturity: u64) -> i128 {
        env.storage()
            .persistent()
            .get::<DataKey, i128>(&DataKey::TotalSupply(maturity))
            .unwrap_or(0)
    }

    /// Check if address is an operator
    pub fn is_operator(env: Env, address: Address) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Operators(address))
            .unwrap_or(false)
    }

    pub fn transfer_hook(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::TransferHook)
    }
}

impl SeriesToken {
    fn admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    fn check_operator(env: &Env, operator: &Address) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        if !Self::is_operator(env.clone(), operator.clone()) {
            return Err(Error::NotOperator);
        }

        operator.require_auth();
        Ok(())
    }

    fn write_balance(env: &Env, maturity: u64, holder: &Address, amount: i128) {
        let key = DataKey::Balance(maturity, holder.clone());
        if amount == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(&key, &amount);
        }
    }
}
