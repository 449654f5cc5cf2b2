use std::path::Path;

use alloy::primitives::Address;
use color_eyre::eyre::{self, Context as _};
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

use crate::{
    chain::{Chain, Network},
    ledger::ConfirmationSettings,
    panel::PanelSettings,
    toast::ToastDurations,
    token::{TargetToken, TokenDescriptor, TokenList},
    wallet::PrivateKey,
};

pub const DEFAULT_CONFIG_FILE: &str = "bridge.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Network the bridge is deployed on
    #[serde(default)]
    pub network: Network,

    /// JSON-RPC endpoint, defaults to the network's public endpoint
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// Key of the local signer. Without it the wallet stays disconnected
    #[serde(default)]
    pub private_key: Option<PrivateKey>,

    /// Address of the token migration contract
    pub migration_contract: Address,

    /// Token every source token is migrated into
    #[serde(default)]
    pub new_token: TargetToken,

    /// Overrides the network's built-in source token list
    #[serde(default)]
    pub tokens: Option<Vec<TokenDescriptor>>,

    #[serde(default)]
    pub toasts: ToastDurations,

    #[serde(default)]
    pub confirmation: ConfirmationSettings,
}

impl Config {
    /// Load configuration from a YAML file and `BRIDGE_` environment variables
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    /// Nested keys are separated by `__` in the environment, e.g. `BRIDGE_TOASTS__COPY_MS`.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("BRIDGE_").split("__"))
    }

    /// One-line description for the startup log. Leaves out the rpc url, which
    /// often embeds a provider key.
    pub fn summary(&self) -> String {
        format!(
            "network={:?} custom_rpc={} signer={} migration_contract={} new_token={}",
            self.network,
            self.rpc_url.is_some(),
            self.private_key.is_some(),
            self.migration_contract,
            self.new_token.symbol
        )
    }

    pub fn chain(&self) -> eyre::Result<Chain> {
        let rpc_url = self
            .rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url());
        Chain::new(self.network, rpc_url).wrap_err("invalid chain configuration")
    }

    pub fn token_list(&self) -> eyre::Result<TokenList> {
        match &self.tokens {
            Some(tokens) => TokenList::new(tokens.clone()).wrap_err("invalid token list"),
            None => Ok(TokenList::for_network(self.network)),
        }
    }

    pub fn panel_settings(&self) -> eyre::Result<PanelSettings> {
        Ok(PanelSettings {
            tokens: self.token_list()?,
            migration_contract: self.migration_contract,
            target: self.new_token.clone(),
            toasts: self.toasts,
        })
    }
}
