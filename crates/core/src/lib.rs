pub mod action;
pub mod amount;
pub mod chain;
pub mod clipboard;
pub mod config;
pub mod ledger;
pub mod panel;
pub mod telemetry;
pub mod toast;
pub mod token;
pub mod view;
pub mod wallet;
