use std::fmt::{self, Display};

use alloy::primitives::TxHash;
use alloy_chains::{self, NamedChain};
use color_eyre::eyre::{self, eyre};
use serde::{Deserialize, Serialize};

/// Networks the bridge is deployed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    #[default]
    Bsc,
    BscTestnet,
}

impl Network {
    pub fn named_chain(self) -> NamedChain {
        match self {
            Network::Bsc => NamedChain::BinanceSmartChain,
            Network::BscTestnet => NamedChain::BinanceSmartChainTestnet,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Network::Bsc => "BNB Smart Chain",
            Network::BscTestnet => "BNB Smart Chain Testnet",
        }
    }

    pub fn default_rpc_url(self) -> &'static str {
        match self {
            Network::Bsc => "https://bsc-dataseed.bnbchain.org",
            Network::BscTestnet => "https://bsc-testnet-rpc.publicnode.com",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chain {
    pub network: Network,
    pub metadata: alloy_chains::Chain,
    pub rpc_url: String,
}

impl Chain {
    pub fn new(network: Network, rpc_url: &str) -> eyre::Result<Self> {
        if !(rpc_url.starts_with("http://") || rpc_url.starts_with("https://")) {
            return Err(eyre!("unsupported rpc url `{rpc_url}`, expected http(s)"));
        }

        Ok(Self {
            network,
            metadata: alloy_chains::Chain::from_named(network.named_chain()),
            rpc_url: rpc_url.to_string(),
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.metadata.id()
    }

    pub fn name(&self) -> &'static str {
        self.network.display_name()
    }

    /// Block explorer link for a transaction, if the chain has a known explorer.
    pub fn explorer_tx_url(&self, hash: &TxHash) -> Option<String> {
        let (_api, base) = self.metadata.named()?.etherscan_urls()?;
        Some(format!("{}/tx/{hash}", base.trim_end_matches('/')))
    }

    #[cfg(test)]
    pub fn bsc_mainnet() -> Self {
        Self {
            network: Network::Bsc,
            metadata: alloy_chains::Chain::from_named(NamedChain::BinanceSmartChain),
            rpc_url: Network::Bsc.default_rpc_url().to_string(),
        }
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id={})", self.name(), self.chain_id())
    }
}
