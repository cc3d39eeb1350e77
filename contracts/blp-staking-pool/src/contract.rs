use soroban_sdk::{contract, contractimpl, token, Address, Env, Vec};

use crate::errors::Error;
use crate::events::*;
use crate::interfaces::BlpRewardClient;
use crate::storage::*;

/// Holds staked BLP tokens per account. Eligibility reads `balance_of`;
/// registered reward distributors are settled before each balance change.
#[contract]
pub struct BlpStakingPool;

#[contractimpl]
impl BlpStakingPool {
    pub fn initialize(env: Env, owner: Address, staking_token: Address) -> Result<(), Error> {
        let instance = env.storage().instance();
        if instance.has(&DataKey::StakingToken) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();
        instance.set(&DataKey::Owner, &owner);
        instance.set(&DataKey::StakingToken, &staking_token);
        instance.set(&DataKey::TotalSupply, &0u128);
        instance.extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
        Ok(())
    }

    pub fn is_staking_pool(_env: Env) -> bool {
        true
    }

    pub fn staking_token(env: Env) -> Result<Address, Error> {
        ensure_initialized(&env)
    }

    pub fn balance_of(env: Env, account: Address) -> u128 {
        read_balance(&env, &account)
    }

    pub fn total_supply(env: Env) -> u128 {
        read_total(&env)
    }

    pub fn get_reward_distributors(env: Env) -> Vec<Address> {
        read_distributors(&env)
    }

    /// Pulls `amount` staking tokens from `spender` and credits `recipient`.
    /// Reward eligibility only sees the new stake on the account's next refresh.
    pub fn stake(env: Env, spender: Address, recipient: Address, amount: u128) -> Result<(), Error> {
        let token = ensure_initialized(&env)?;
        spender.require_auth();
        if amount == 0 {
            return Err(Error::StakeAmountIsZero);
        }
        let balance = read_balance(&env, &recipient);
        let total = read_total(&env);
        settle_distributors(&env, &recipient, balance, total);

        token::Client::new(&env, &token).transfer(
            &spender,
            &env.current_contract_address(),
            &to_i128(amount),
        );
        write_balance(&env, &recipient, balance + amount);
        let total_staked = total + amount;
        write_total(&env, total_staked);
        Staked {
            spender,
            recipient,
            amount,
            total_staked,
        }
        .publish(&env);
        Ok(())
    }

    /// Like `stake`, the lower balance reaches eligibility on the next refresh.
    pub fn withdraw(env: Env, account: Address, amount: u128) -> Result<(), Error> {
        let token = ensure_initialized(&env)?;
        account.require_auth();
        if amount == 0 {
            return Err(Error::WithdrawAmountIsZero);
        }
        let balance = read_balance(&env, &account);
        if amount > balance {
            return Err(Error::InsufficientBalance);
        }
        let total = read_total(&env);
        settle_distributors(&env, &account, balance, total);

        write_balance(&env, &account, balance - amount);
        let total_staked = total - amount;
        write_total(&env, total_staked);
        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &account,
            &to_i128(amount),
        );
        Withdrawn {
            account,
            amount,
            total_staked,
        }
        .publish(&env);
        Ok(())
    }

    // Admin

    pub fn set_owner(env: Env, new_owner: Address) -> Result<(), Error> {
        let old_owner = require_owner(&env)?;
        env.storage().instance().set(&DataKey::Owner, &new_owner);
        NewOwner {
            old_owner,
            new_owner,
        }
        .publish(&env);
        Ok(())
    }

    pub fn add_reward_distributor(env: Env, distributor: Address) -> Result<(), Error> {
        require_owner(&env)?;
        let mut distributors = read_distributors(&env);
        if distributors.contains(&distributor) {
            return Err(Error::RewardDistributorAlreadyExists);
        }
        distributors.push_back(distributor.clone());
        write_distributors(&env, &distributors);
        AddRewardDistributor { distributor }.publish(&env);
        Ok(())
    }

    pub fn remove_reward_distributor(env: Env, distributor: Address) -> Result<(), Error> {
        require_owner(&env)?;
        let mut distributors = read_distributors(&env);
        let Some(pos) = distributors.first_index_of(&distributor) else {
            return Err(Error::RewardDistributorNotExist);
        };
        let last = distributors.len() - 1;
        if pos != last {
            if let Some(tail) = distributors.get(last) {
                distributors.set(pos, tail);
            }
        }
        distributors.pop_back();
        write_distributors(&env, &distributors);
        RemoveRewardDistributor { distributor }.publish(&env);
        Ok(())
    }
}

fn settle_distributors(env: &Env, account: &Address, balance: u128, total: u128) {
    let me = env.current_contract_address();
    for distributor in read_distributors(env).iter() {
        BlpRewardClient::new(env, &distributor).update_reward(&me, account, &balance, &total);
    }
}
