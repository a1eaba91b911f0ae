//! CLI tool for deploying and interacting with the reward pool.

use reward_pool::staking::RewardPool;
use reward_pool::token::PoolToken;
use odra::casper_types::U256;
use odra::prelude::{Address, Addressable};
use odra::host::HostEnv;
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Token name used when `POOL_TOKEN_NAME` is not set.
const DEFAULT_TOKEN_NAME: &str = "TKN";
/// Token symbol used when `POOL_TOKEN_SYMBOL` is not set.
const DEFAULT_TOKEN_SYMBOL: &str = "TKN";

/// Reads a setting from the environment odra-cli loads (`.env` included).
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| String::from(default))
}

/// Deploys the ledger token, named by `POOL_TOKEN_NAME` / `POOL_TOKEN_SYMBOL`.
pub struct TokenDeployScript;

impl DeployScript for TokenDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use reward_pool::token::PoolTokenInitArgs;

        let _token = PoolToken::load_or_deploy(
            &env,
            PoolTokenInitArgs {
                name: env_or("POOL_TOKEN_NAME", DEFAULT_TOKEN_NAME),
                symbol: env_or("POOL_TOKEN_SYMBOL", DEFAULT_TOKEN_SYMBOL),
            },
            container,
            300_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the reward pool over the ledger token.
/// Requires the token to be deployed first.
pub struct PoolDeployScript;

impl DeployScript for PoolDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use reward_pool::staking::reward_pool::RewardPoolInitArgs;

        let token = container.contract_ref::<PoolToken>(env)?;
        let token_address = token.address().clone();

        let _pool = RewardPool::load_or_deploy(
            &env,
            RewardPoolInitArgs {
                token: token_address,
            },
            container,
            400_000_000_000
        )?;

        Ok(())
    }
}

/// Deploys the token and the pool.
pub struct FullDeployScript;

impl DeployScript for FullDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        TokenDeployScript.deploy(env, container)?;
        PoolDeployScript.deploy(env, container)?;
        Ok(())
    }
}

fn amount_arg() -> CommandArg {
    CommandArg::new(
        "amount",
        "Amount in token base units",
        NamedCLType::U256,
    )
}

/// Approves the pool to pull `amount` of the caller's tokens.
fn approve_pool(
    env: &HostEnv,
    container: &DeployedContractsContainer,
    amount: U256
) -> Result<(), Error> {
    let mut token = container.contract_ref::<PoolToken>(env)?;
    let pool = container.contract_ref::<RewardPool>(env)?;

    env.set_gas(50_000_000_000);
    token.try_approve(pool.address().clone(), amount)?;
    Ok(())
}

/// Scenario to stake tokens.
pub struct StakeScenario;

impl Scenario for StakeScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![amount_arg()]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let amount = args.get_single::<U256>("amount")?;
        approve_pool(env, container, amount)?;

        let mut pool = container.contract_ref::<RewardPool>(env)?;
        env.set_gas(100_000_000_000);
        pool.try_stake(amount)?;

        println!("Staked {}; total stake is now {}", amount, pool.total_stake());
        Ok(())
    }
}

impl ScenarioMetadata for StakeScenario {
    const NAME: &'static str = "stake";
    const DESCRIPTION: &'static str = "Approves the pool and stakes tokens";
}

/// Scenario to withdraw stake together with its accrued reward.
pub struct UnstakeScenario;

impl Scenario for UnstakeScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![amount_arg()]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let amount = args.get_single::<U256>("amount")?;
        let mut pool = container.contract_ref::<RewardPool>(env)?;

        let reward = pool.try_get_reward(env.caller(), amount)?;
        env.set_gas(100_000_000_000);
        pool.try_unstake(amount)?;

        println!("Unstaked {} with reward {}", amount, reward);
        Ok(())
    }
}

impl ScenarioMetadata for UnstakeScenario {
    const NAME: &'static str = "unstake";
    const DESCRIPTION: &'static str = "Withdraws stake and the reward accrued on it";
}

/// Scenario to inject a reward into the pool.
pub struct DistributeScenario;

impl Scenario for DistributeScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![amount_arg()]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let amount = args.get_single::<U256>("amount")?;
        approve_pool(env, container, amount)?;

        let mut pool = container.contract_ref::<RewardPool>(env)?;
        env.set_gas(100_000_000_000);
        pool.try_distribute(amount)?;

        println!("Distributed {}; reward per stake is now {}", amount, pool.reward_per_stake());
        Ok(())
    }
}

impl ScenarioMetadata for DistributeScenario {
    const NAME: &'static str = "distribute";
    const DESCRIPTION: &'static str = "Injects a reward shared by all current stakers";
}

/// Scenario to preview the reward an unstake would pay.
pub struct RewardScenario;

impl Scenario for RewardScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new(
                "account",
                "Address of the staker",
                NamedCLType::Key,
            ),
            amount_arg(),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let account = args.get_single::<Address>("account")?;
        let amount = args.get_single::<U256>("amount")?;
        let pool = container.contract_ref::<RewardPool>(env)?;

        let stake = pool.get_stake(account);
        let reward = pool.try_get_reward(account, amount)?;
        println!("Stake: {}, reward on unstake of {}: {}", stake, amount, reward);
        Ok(())
    }
}

impl ScenarioMetadata for RewardScenario {
    const NAME: &'static str = "reward";
    const DESCRIPTION: &'static str = "Previews the reward paid by an unstake";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the reward pool contracts")
        // Deploy scripts
        .deploy(TokenDeployScript)
        .deploy(PoolDeployScript)
        .deploy(FullDeployScript)
        // Contract references
        .contract::<PoolToken>()
        .contract::<RewardPool>()
        // Scenarios
        .scenario(StakeScenario)
        .scenario(UnstakeScenario)
        .scenario(DistributeScenario)
        .scenario(RewardScenario)
        .build()
        .run();
}
