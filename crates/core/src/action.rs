//! Chooses what the submit button does.
use std::fmt::{self, Display};

use alloy::primitives::{Address, U256};

use crate::token::TokenList;

/// Approval sent when no amount is set.
pub const UNLIMITED_APPROVAL: U256 = U256::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Ask the wallet connector to connect
    Connect,
    /// Approve the migration contract to spend the requested amount
    Approve,
    /// Migrate the requested amount into the target token
    Migrate,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Connect => "Connect Wallet",
            Action::Approve => "Approve",
            Action::Migrate => "Convert",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Connect => "connect",
            Action::Approve => "approve",
            Action::Migrate => "migrate",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub disabled: bool,
}

/// Derives the submit action from the connection state and the two fetched
/// quantities.
pub fn decide(connected: bool, requested: U256, approved: U256, is_pending: bool) -> Decision {
    let action = if !connected {
        Action::Connect
    } else if requested > approved {
        Action::Approve
    } else {
        Action::Migrate
    };
    let disabled = (connected && requested.is_zero()) || is_pending;

    Decision { action, disabled }
}

/// Amount passed to `approve`.
pub fn approval_amount(requested: U256) -> U256 {
    if requested.is_zero() {
        UNLIMITED_APPROVAL
    } else {
        requested
    }
}

/// The migration contract entry point for a source token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MigrateMethod {
    MigrateA,
    MigrateB,
}

impl MigrateMethod {
    /// `migrateA` for the first listed token, `migrateB` for any other.
    pub fn for_token(tokens: &TokenList, token: Address) -> Self {
        if tokens.is_first(token) {
            MigrateMethod::MigrateA
        } else {
            MigrateMethod::MigrateB
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MigrateMethod::MigrateA => "migrateA",
            MigrateMethod::MigrateB => "migrateB",
        }
    }
}

impl Display for MigrateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
