//! Text rendering of the conversion panel.
use std::fmt::{self, Display};

use alloy::primitives::Address;

use crate::wallet::{AccountSummary, ChainSummary};

/// A snapshot of everything the panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub header: HeaderView,
    pub token_label: String,
    /// Entry labels while the dropdown is open
    pub dropdown: Option<Vec<String>>,
    pub amount: String,
    /// Formatted balance, `None` while it is loading
    pub available: Option<String>,
    pub button: ButtonView,
    /// Connected but the allowance has not resolved yet
    pub loading: bool,
    pub target_symbol: String,
    pub target_address: Address,
    pub toasts: Vec<&'static str>,
    /// Explorer link of the transaction behind the pending toast
    pub pending_tx_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub title: String,
    pub account: Option<AccountSummary>,
    pub chain: Option<ChainSummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub disabled: bool,
    pub busy: bool,
}

impl Display for HeaderView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "== {} ==", self.title)?;
        match (&self.chain, &self.account) {
            (Some(chain), Some(account)) => {
                write!(f, "  [{}] [{}]", chain.name, account.short)
            }
            (None, Some(account)) => write!(f, "  [{}]", account.short),
            _ => write!(f, "  [Connect Wallet]"),
        }
    }
}

impl Display for ButtonView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.busy {
            write!(f, "[ ... {} ]", self.label)?;
        } else {
            write!(f, "[ {} ]", self.label)?;
        }
        if self.disabled {
            write!(f, " (disabled)")?;
        }
        Ok(())
    }
}

impl Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f)?;

        let arrow = if self.dropdown.is_some() { "^" } else { "v" };
        writeln!(f, "Token:     {} {arrow}", self.token_label)?;
        if let Some(entries) = &self.dropdown {
            for (i, entry) in entries.iter().enumerate() {
                writeln!(f, "           {}) {entry}", i + 1)?;
            }
        }

        let available = self.available.as_deref().unwrap_or("...");
        writeln!(f, "Amount:    {} [MAX]    Available: {available}", self.amount)?;
        writeln!(f, "{}", self.button)?;
        if self.loading {
            writeln!(f, "(loading allowance...)")?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Note: add the {} contract to your wallet: {}",
            self.target_symbol, self.target_address
        )?;

        for toast in &self.toasts {
            writeln!(f, "* {toast}")?;
        }
        if let Some(url) = &self.pending_tx_url {
            writeln!(f, "  {url}")?;
        }
        Ok(())
    }
}
