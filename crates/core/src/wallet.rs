use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use color_eyre::eyre::{self, Context as _, OptionExt as _};
use serde::Deserialize;
use tracing::info;

use crate::chain::Chain;

/// The connected wallet, as seen by the panel.
///
/// `address` and `chain` are `None` until a wallet is attached.
pub trait WalletConnector {
    fn address(&self) -> Option<Address>;

    fn chain(&self) -> Option<&Chain>;

    fn is_connected(&self) -> bool {
        self.address().is_some()
    }

    /// Attaches a wallet and returns its address.
    fn open_connect_modal(&mut self) -> eyre::Result<Address>;

    fn disconnect(&mut self);

    fn open_account_modal(&self) -> Option<AccountSummary> {
        self.address().map(AccountSummary::new)
    }

    fn open_chain_modal(&self) -> Option<ChainSummary> {
        self.chain().map(|chain| ChainSummary {
            name: chain.name().to_string(),
            id: chain.chain_id(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub address: Address,
    /// `0x1234...abcd`
    pub short: String,
}

impl AccountSummary {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            short: short_address(&address),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSummary {
    pub name: String,
    pub id: u64,
}

/// First six and last four characters of the checksummed address.
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Hex private key read from configuration. Never printed.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct PrivateKey(String);

impl PrivateKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn to_signer(&self) -> eyre::Result<PrivateKeySigner> {
        self.0
            .trim()
            .parse()
            .wrap_err("failed to parse private key")
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// A wallet backed by a locally held private key.
///
/// Starts connected when a key is configured; `disconnect` detaches it until the
/// next `open_connect_modal`.
pub struct LocalWallet {
    chain: Chain,
    signer: Option<PrivateKeySigner>,
    connected: bool,
}

impl LocalWallet {
    pub fn new(chain: Chain, private_key: Option<&PrivateKey>) -> eyre::Result<Self> {
        let signer = private_key.map(PrivateKey::to_signer).transpose()?;
        let connected = signer.is_some();

        Ok(Self {
            chain,
            signer,
            connected,
        })
    }

    pub fn signer(&self) -> Option<&PrivateKeySigner> {
        self.signer.as_ref()
    }
}

impl WalletConnector for LocalWallet {
    fn address(&self) -> Option<Address> {
        if !self.connected {
            return None;
        }
        self.signer.as_ref().map(|signer| signer.address())
    }

    fn chain(&self) -> Option<&Chain> {
        self.connected.then_some(&self.chain)
    }

    fn open_connect_modal(&mut self) -> eyre::Result<Address> {
        let address = self
            .signer
            .as_ref()
            .map(|signer| signer.address())
            .ok_or_eyre("no private key configured, set `private_key` or BRIDGE_PRIVATE_KEY")?;
        self.connected = true;

        info!(wallet.address = %address, chain = %self.chain, "wallet connected");
        Ok(address)
    }

    fn disconnect(&mut self) {
        if self.connected {
            info!("wallet disconnected");
        }
        self.connected = false;
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    // first well-known development account
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_configured_key_starts_connected() {
        let key = PrivateKey::new(DEV_KEY);
        let wallet = LocalWallet::new(Chain::bsc_mainnet(), Some(&key)).unwrap();

        assert!(wallet.is_connected());
        assert_eq!(
            wallet.address(),
            Some(address!("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"))
        );
        assert_eq!(
            wallet.open_account_modal().map(|a| a.short),
            Some("0xf39F...2266".to_string())
        );
        assert_eq!(wallet.open_chain_modal().map(|c| c.id), Some(56));
    }

    #[test]
    fn test_disconnect_and_reconnect() {
        let key = PrivateKey::new(DEV_KEY);
        let mut wallet = LocalWallet::new(Chain::bsc_mainnet(), Some(&key)).unwrap();

        wallet.disconnect();
        assert!(!wallet.is_connected());
        assert!(wallet.chain().is_none());
        assert!(wallet.open_account_modal().is_none());

        let address = wallet.open_connect_modal().unwrap();
        assert_eq!(wallet.address(), Some(address));
    }

    #[test]
    fn test_connect_without_key_fails() {
        let mut wallet = LocalWallet::new(Chain::bsc_mainnet(), None).unwrap();

        assert!(!wallet.is_connected());
        assert!(wallet.open_connect_modal().is_err());
        assert!(!wallet.is_connected());
    }

    #[test]
    fn test_bad_key_is_rejected_and_redacted() {
        let key = PrivateKey::new("not-a-key");
        assert!(LocalWallet::new(Chain::bsc_mainnet(), Some(&key)).is_err());
        assert_eq!(format!("{key:?}"), "PrivateKey(<redacted>)");
    }
}
