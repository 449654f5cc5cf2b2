//! On-chain reads and writes for the bridge.
//!
//! [`ChainReader`] and [`ChainWriter`] are the seams the panel talks to;
//! [`RpcLedger`] implements both over an alloy HTTP provider.
use std::{future::Future, time::Duration};

use alloy::{
    network::{EthereumWallet, ReceiptResponse as _},
    primitives::{Address, TxHash, U256},
    providers::{DynProvider, Provider as _, ProviderBuilder},
    signers::local::PrivateKeySigner,
    sol,
};
use color_eyre::eyre::{self, Context as _, OptionExt as _, eyre};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{action::MigrateMethod, chain::Chain};

// Taken from https://github.com/OpenZeppelin/openzeppelin-contracts/blob/3790c59623e99cb0272ddf84e6a17a5979d06b35/contracts/token/ERC20/IERC20.sol
sol!(
    #[sol(rpc)]
    contract IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 value) external returns (bool);
    }
);

sol!(
    #[sol(rpc)]
    contract ITokenMigration {
        function migrateA(uint256 amount) external;
        function migrateB(uint256 amount) external;
    }
);

/// Final status of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxOutcome {
    Confirmed,
    Reverted,
}

pub trait ChainReader {
    fn balance_of(
        &self,
        token: Address,
        owner: Address,
    ) -> impl Future<Output = eyre::Result<U256>> + Send;

    fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> impl Future<Output = eyre::Result<U256>> + Send;
}

pub trait ChainWriter {
    /// Submits `approve(spender, amount)` on `token` and returns once it is broadcast.
    fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> impl Future<Output = eyre::Result<TxHash>> + Send;

    /// Submits `migrateA(amount)` or `migrateB(amount)` on the migration contract.
    fn migrate(
        &self,
        contract: Address,
        method: MigrateMethod,
        amount: U256,
    ) -> impl Future<Output = eyre::Result<TxHash>> + Send;

    /// Resolves once the transaction is mined.
    fn wait_for_receipt(
        &self,
        hash: TxHash,
    ) -> impl Future<Output = eyre::Result<TxOutcome>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationSettings {
    pub poll_interval_ms: u64,
    pub timeout_secs: u64,
}

impl Default for ConfirmationSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2_000,
            timeout_secs: 300,
        }
    }
}

impl ConfirmationSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Reads and writes through a JSON-RPC endpoint. Writes need a signer.
#[derive(Clone)]
pub struct RpcLedger {
    provider: DynProvider,
    chain: Chain,
    sender: Option<Address>,
    confirmation: ConfirmationSettings,
}

impl RpcLedger {
    pub fn connect(
        chain: Chain,
        signer: Option<PrivateKeySigner>,
        confirmation: ConfirmationSettings,
    ) -> eyre::Result<Self> {
        let url = chain.rpc_url.parse().wrap_err("failed to parse RPC URL")?;
        let sender = signer.as_ref().map(|signer| signer.address());
        let provider = match signer {
            Some(signer) => ProviderBuilder::new()
                .wallet(EthereumWallet::new(signer))
                .connect_http(url)
                .erased(),
            None => ProviderBuilder::new().connect_http(url).erased(),
        };

        info!(%chain, signer = ?sender, "🔗 connected to rpc");

        Ok(Self {
            provider,
            chain,
            sender,
            confirmation,
        })
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    fn sender(&self) -> eyre::Result<Address> {
        self.sender
            .ok_or_eyre("no signer attached, cannot submit transactions")
    }
}

impl ChainReader for RpcLedger {
    async fn balance_of(&self, token: Address, owner: Address) -> eyre::Result<U256> {
        IERC20::new(token, self.provider.clone())
            .balanceOf(owner)
            .call()
            .await
            .wrap_err("balanceOf call failed")
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> eyre::Result<U256> {
        IERC20::new(token, self.provider.clone())
            .allowance(owner, spender)
            .call()
            .await
            .wrap_err("allowance call failed")
    }
}

impl ChainWriter for RpcLedger {
    #[instrument(skip(self), fields(chain = %self.chain))]
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> eyre::Result<TxHash> {
        let from = self.sender()?;
        let erc20 = IERC20::new(token, self.provider.clone());
        let call = erc20.approve(spender, amount).from(from);

        // simulate first so reverts surface before anything is signed
        call.call().await.wrap_err("approve simulation failed")?;
        let pending = call.send().await.wrap_err("failed to submit approve")?;

        debug!(tx.hash = %pending.tx_hash(), "approve broadcast");
        Ok(*pending.tx_hash())
    }

    #[instrument(skip(self), fields(chain = %self.chain))]
    async fn migrate(
        &self,
        contract: Address,
        method: MigrateMethod,
        amount: U256,
    ) -> eyre::Result<TxHash> {
        let from = self.sender()?;
        let migration = ITokenMigration::new(contract, self.provider.clone());

        let pending = match method {
            MigrateMethod::MigrateA => {
                let call = migration.migrateA(amount).from(from);
                call.call().await.wrap_err("migrateA simulation failed")?;
                call.send().await
            }
            MigrateMethod::MigrateB => {
                let call = migration.migrateB(amount).from(from);
                call.call().await.wrap_err("migrateB simulation failed")?;
                call.send().await
            }
        }
        .wrap_err_with(|| format!("failed to submit {method}"))?;

        debug!(tx.hash = %pending.tx_hash(), "migration broadcast");
        Ok(*pending.tx_hash())
    }

    #[instrument(skip(self), fields(chain = %self.chain))]
    async fn wait_for_receipt(&self, hash: TxHash) -> eyre::Result<TxOutcome> {
        let poll_interval = self.confirmation.poll_interval();
        let timeout = self.confirmation.timeout();

        let poll = async {
            loop {
                let receipt = self
                    .provider
                    .get_transaction_receipt(hash)
                    .await
                    .wrap_err("failed to fetch transaction receipt")?;
                if let Some(receipt) = receipt {
                    return Ok::<_, eyre::Report>(receipt);
                }
                tokio::time::sleep(poll_interval).await;
            }
        };

        let receipt = tokio::time::timeout(timeout, poll).await.map_err(|_| {
            eyre!(
                "transaction {hash} not mined after {}",
                humantime::format_duration(timeout)
            )
        })??;

        debug!(block = ?receipt.block_number(), status = receipt.status(), "receipt received");
        Ok(if receipt.status() {
            TxOutcome::Confirmed
        } else {
            TxOutcome::Reverted
        })
    }
}
