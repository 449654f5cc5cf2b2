use std::collections::HashSet;

use alloy::primitives::{Address, address};
use color_eyre::eyre::{self, eyre};
use serde::{Deserialize, Serialize};

use crate::chain::Network;

/// Largest exponent for which `10^decimals` still fits in a `U256`.
pub const MAX_DECIMALS: u8 = 77;

/// A legacy ERC-20 token that can be migrated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub name: String,
    pub symbol: String,
    pub address: Address,
    /// Path or URL of the token logo
    #[serde(default)]
    pub logo: String,
    pub decimals: u8,
}

impl TokenDescriptor {
    fn builtin(name: &str, symbol: &str, address: Address, logo: &str) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            address,
            logo: logo.to_string(),
            decimals: 18,
        }
    }

    /// `Name (SYMBOL)`, as shown in the dropdown.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }
}

/// The token every source token is migrated into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetToken {
    pub name: String,
    pub symbol: String,
    pub address: Address,
}

impl Default for TargetToken {
    fn default() -> Self {
        Self {
            name: "Fintyh Coin".to_string(),
            symbol: "FTC".to_string(),
            address: address!("0xd385764e63101856c182727520ecfd2bc0abaed9"),
        }
    }
}

/// Ordered, non-empty list of migratable tokens. The first entry is routed to
/// `migrateA`, every other entry to `migrateB`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenList(Vec<TokenDescriptor>);

impl TokenList {
    pub fn new(tokens: Vec<TokenDescriptor>) -> eyre::Result<Self> {
        if tokens.is_empty() {
            return Err(eyre!("token list must contain at least one token"));
        }

        let mut seen = HashSet::new();
        for token in &tokens {
            if !seen.insert(token.address) {
                return Err(eyre!("duplicate token address {}", token.address));
            }
            if token.decimals > MAX_DECIMALS {
                return Err(eyre!(
                    "token {} has {} decimals, at most {MAX_DECIMALS} are supported",
                    token.symbol,
                    token.decimals
                ));
            }
        }

        Ok(Self(tokens))
    }

    /// The built-in list for a network.
    pub fn for_network(network: Network) -> Self {
        let tokens = match network {
            Network::Bsc => vec![
                TokenDescriptor::builtin(
                    "Jedals",
                    "JEDALS",
                    address!("0xa310017e40e687c8670d218e3c86a0d09786574f"),
                    "/jedals.png",
                ),
                TokenDescriptor::builtin(
                    "Fintyhub",
                    "FTH",
                    address!("0x3228ad31679e826e9efe1cace04fc0fb85ed482f"),
                    "/fth.png",
                ),
            ],
            Network::BscTestnet => vec![
                TokenDescriptor::builtin(
                    "Jedals",
                    "JEDALS",
                    address!("0xebba059f93f2dc0b6b25db77e1d95d541c8abf6f"),
                    "/jedals.png",
                ),
                TokenDescriptor::builtin(
                    "Fintyhub",
                    "FTH",
                    address!("0xd1eccc8c0b2b603556c023c21223e13f9601a8ec"),
                    "/fth.png",
                ),
            ],
        };

        Self(tokens)
    }

    pub fn first(&self) -> &TokenDescriptor {
        &self.0[0]
    }

    pub fn get(&self, index: usize) -> Option<&TokenDescriptor> {
        self.0.get(index)
    }

    pub fn find(&self, address: Address) -> Option<&TokenDescriptor> {
        self.0.iter().find(|token| token.address == address)
    }

    /// Case-insensitive lookup by ticker symbol.
    pub fn by_symbol(&self, symbol: &str) -> Option<&TokenDescriptor> {
        self.0
            .iter()
            .find(|token| token.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Returns the token at `address`, or the first token if the address is not listed.
    pub fn resolve(&self, address: Address) -> &TokenDescriptor {
        self.find(address).unwrap_or_else(|| self.first())
    }

    pub fn is_first(&self, address: Address) -> bool {
        self.first().address == address
    }

    pub fn iter(&self) -> impl Iterator<Item = &TokenDescriptor> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
