use soroban_sdk::{contract, contractimpl, token, Address, Env, U256};

use crate::errors::Error;
use crate::events::*;
use crate::interfaces::StakingPoolClient;
use crate::rewards::{compute_reward_per_token, earned as accrued_reward};
use crate::storage::*;

/// Streams `reward_rate` tokens per second to the stakers of one BLP
/// staking pool, pro rata to their staked balance. Rewards are paid out
/// of the treasury's allowance.
#[contract]
pub struct BlpReward;

#[contractimpl]
impl BlpReward {
    pub fn initialize(
        env: Env,
        owner: Address,
        staking_pool: Address,
        reward_token: Address,
        treasury: Address,
    ) -> Result<(), Error> {
        let instance = env.storage().instance();
        if instance.has(&DataKey::StakingPool) {
            return Err(Error::AlreadyInitialized);
        }
        owner.require_auth();
        instance.set(&DataKey::Owner, &owner);
        instance.set(&DataKey::StakingPool, &staking_pool);
        instance.set(&DataKey::RewardToken, &reward_token);
        instance.set(&DataKey::Treasury, &treasury);
        instance.set(&DataKey::LastUpdateTime, &env.ledger().timestamp());
        instance.extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
        Ok(())
    }

    pub fn staking_pool(env: Env) -> Result<Address, Error> {
        read_address(&env, &DataKey::StakingPool)
    }

    pub fn reward_token(env: Env) -> Result<Address, Error> {
        read_address(&env, &DataKey::RewardToken)
    }

    pub fn treasury(env: Env) -> Result<Address, Error> {
        read_address(&env, &DataKey::Treasury)
    }

    pub fn reward_rate(env: Env) -> u128 {
        read_u128(&env, &DataKey::RewardRate)
    }

    pub fn reward_per_token(env: Env) -> Result<U256, Error> {
        ensure_initialized(&env)?;
        let pool = StakingPoolClient::new(&env, &read_address(&env, &DataKey::StakingPool)?);
        Ok(current_rpt(&env, pool.total_supply()))
    }

    pub fn earned(env: Env, account: Address) -> Result<u128, Error> {
        ensure_initialized(&env)?;
        let pool = StakingPoolClient::new(&env, &read_address(&env, &DataKey::StakingPool)?);
        let rpt = current_rpt(&env, pool.total_supply());
        Ok(accrued_reward(
            &env,
            pool.balance_of(&account),
            &rpt,
            &read_user_paid(&env, &account),
            read_rewards(&env, &account),
        ))
    }

    /// Total reward emitted so far, including the interval not yet checkpointed.
    pub fn reward_distributed(env: Env) -> Result<u128, Error> {
        ensure_initialized(&env)?;
        let pool = StakingPoolClient::new(&env, &read_address(&env, &DataKey::StakingPool)?);
        let stored = read_u128(&env, &DataKey::RewardDistributed);
        Ok(stored + pending_emission(&env, pool.total_supply()))
    }

    /// Checkpoint `account` using the balances the pool holds before it
    /// applies a stake or withdraw.
    pub fn update_reward(
        env: Env,
        caller: Address,
        account: Address,
        balance: u128,
        total_supply: u128,
    ) -> Result<(), Error> {
        ensure_initialized(&env)?;
        caller.require_auth();
        if caller != read_address(&env, &DataKey::StakingPool)? {
            return Err(Error::CallerIsNotStakingPool);
        }
        let rpt = checkpoint(&env, total_supply);
        settle_account(&env, &account, balance, &rpt);
        Ok(())
    }

    /// Pays everything `account` has earned from the treasury.
    pub fn get_reward(env: Env, account: Address) -> Result<u128, Error> {
        ensure_initialized(&env)?;
        let pool = StakingPoolClient::new(&env, &read_address(&env, &DataKey::StakingPool)?);
        let rpt = checkpoint(&env, pool.total_supply());
        let owed = settle_account(&env, &account, pool.balance_of(&account), &rpt);
        if owed == 0 {
            return Ok(0);
        }
        write_account(&env, &account, &rpt, 0);
        let token = read_address(&env, &DataKey::RewardToken)?;
        let treasury = read_address(&env, &DataKey::Treasury)?;
        token::Client::new(&env, &token).transfer_from(
            &env.current_contract_address(),
            &treasury,
            &account,
            &to_i128(owed),
        );
        RewardPaid {
            account,
            amount: owed,
        }
        .publish(&env);
        Ok(owed)
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

    /// Checkpoints at the old rate before switching.
    pub fn set_reward_rate(env: Env, reward_rate: u128) -> Result<(), Error> {
        require_owner(&env)?;
        let old_rate = read_u128(&env, &DataKey::RewardRate);
        if old_rate == reward_rate {
            return Err(Error::SameRewardRate);
        }
        let pool = StakingPoolClient::new(&env, &read_address(&env, &DataKey::StakingPool)?);
        checkpoint(&env, pool.total_supply());
        env.storage()
            .instance()
            .set(&DataKey::RewardRate, &reward_rate);
        RewardRateUpdated {
            old_rate,
            new_rate: reward_rate,
        }
        .publish(&env);
        Ok(())
    }

    pub fn set_treasury(env: Env, treasury: Address) -> Result<(), Error> {
        require_owner(&env)?;
        let old_treasury = read_address(&env, &DataKey::Treasury)?;
        if old_treasury == treasury {
            return Err(Error::SameTreasuryAddress);
        }
        env.storage().instance().set(&DataKey::Treasury, &treasury);
        TreasuryUpdated {
            old_treasury,
            new_treasury: treasury,
        }
        .publish(&env);
        Ok(())
    }

    /// Sends tokens held by this contract (e.g. mistaken transfers) to `to`.
    pub fn rescue_tokens(env: Env, token: Address, amount: u128, to: Address) -> Result<(), Error> {
        require_owner(&env)?;
        if amount == 0 {
            return Err(Error::NothingToRescue);
        }
        token::Client::new(&env, &token).transfer(
            &env.current_contract_address(),
            &to,
            &to_i128(amount),
        );
        TokensRescued { token, to, amount }.publish(&env);
        Ok(())
    }
}

fn pending_emission(env: &Env, total_supply: u128) -> u128 {
    if total_supply == 0 {
        return 0;
    }
    let elapsed = env.ledger().timestamp().saturating_sub(read_last_update(env));
    read_u128(env, &DataKey::RewardRate).saturating_mul(elapsed as u128)
}

fn current_rpt(env: &Env, total_supply: u128) -> U256 {
    let elapsed = env.ledger().timestamp().saturating_sub(read_last_update(env));
    compute_reward_per_token(
        env,
        &read_rpt_stored(env),
        read_u128(env, &DataKey::RewardRate),
        elapsed,
        total_supply,
    )
}

/// Folds the elapsed interval into the stored accumulator and emission total.
fn checkpoint(env: &Env, total_supply: u128) -> U256 {
    let rpt = current_rpt(env, total_supply);
    let distributed = read_u128(env, &DataKey::RewardDistributed) + pending_emission(env, total_supply);
    let instance = env.storage().instance();
    instance.set(&DataKey::RewardPerTokenStored, &rpt);
    instance.set(&DataKey::RewardDistributed, &distributed);
    instance.set(&DataKey::LastUpdateTime, &env.ledger().timestamp());
    rpt
}

fn settle_account(env: &Env, account: &Address, balance: u128, rpt: &U256) -> u128 {
    let owed = accrued_reward(
        env,
        balance,
        rpt,
        &read_user_paid(env, account),
        read_rewards(env, account),
    );
    write_account(env, account, rpt, owed);
    owed
}
