//! Interactive conversion panel driven by line commands on stdin.
use std::{
    str::FromStr,
    time::{Duration, Instant},
};

use alloy::primitives::TxHash;
use bridge_core::{
    config::Config,
    ledger::{ChainWriter as _, TxOutcome},
    panel::Submission,
    wallet::WalletConnector as _,
};
use color_eyre::eyre::{self, eyre};
use tokio::{
    io::{AsyncBufReadExt as _, BufReader},
    select,
    sync::mpsc,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{
    cli::{Panel, build_panel},
    clipboard::Osc52Clipboard,
};

const HELP: &str = "\
commands:
  select <n|SYMBOL>   pick a token from the list
  dropdown            open or close the token list
  amount <value>      set the amount to convert
  max                 use the full balance
  submit              press the action button
  copy                copy the FTC contract address
  connect             connect the wallet
  disconnect          disconnect the wallet
  account             show the connected account
  chain               show the connected network
  refresh             re-read balance and allowance
  help                show this message
  quit                leave the panel";

#[derive(clap::Args, Debug)]
pub(crate) struct Session {
    /// How often toast timers are checked
    #[clap(long, default_value = "250ms", value_parser = humantime::parse_duration)]
    pub tick: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PanelCommand {
    /// One-based position in the list
    SelectIndex(usize),
    SelectSymbol(String),
    Dropdown,
    Amount(String),
    Max,
    Submit,
    Copy,
    Connect,
    Disconnect,
    Account,
    Chain,
    Refresh,
    Help,
    Quit,
}

impl FromStr for PanelCommand {
    type Err = eyre::Report;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((line, ""));

        let command = match (word.to_ascii_lowercase().as_str(), rest) {
            ("select", "") => return Err(eyre!("usage: select <n|SYMBOL>")),
            ("select", arg) => match arg.parse::<usize>() {
                Ok(0) => return Err(eyre!("token positions start at 1")),
                Ok(n) => PanelCommand::SelectIndex(n),
                Err(_) => PanelCommand::SelectSymbol(arg.to_string()),
            },
            ("amount", "") => return Err(eyre!("usage: amount <value>")),
            ("amount", arg) => PanelCommand::Amount(arg.to_string()),
            ("dropdown", "") => PanelCommand::Dropdown,
            ("max", "") => PanelCommand::Max,
            ("submit", "") => PanelCommand::Submit,
            ("copy", "") => PanelCommand::Copy,
            ("connect", "") => PanelCommand::Connect,
            ("disconnect", "") => PanelCommand::Disconnect,
            ("account", "") => PanelCommand::Account,
            ("chain", "") => PanelCommand::Chain,
            ("refresh", "") => PanelCommand::Refresh,
            ("help" | "?", "") => PanelCommand::Help,
            ("quit" | "exit" | "q", "") => PanelCommand::Quit,
            _ => return Err(eyre!("unknown command `{line}`, try `help`")),
        };

        Ok(command)
    }
}

impl Session {
    pub(crate) async fn run(&self, config: &Config, shutdown_token: CancellationToken) -> eyre::Result<()> {
        let mut panel = build_panel(config)?;
        panel.refresh().await;
        println!("{}", panel.view());
        println!("type `help` for commands");

        let (receipt_tx, mut receipt_rx) = mpsc::unbounded_channel();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut ticker = tokio::time::interval(self.tick);

        loop {
            select! {
                biased;

                _ = shutdown_token.cancelled() => {
                    info!("shutting down panel");
                    break;
                }

                Some((hash, outcome)) = receipt_rx.recv() => {
                    panel.on_receipt(hash, outcome).await;
                    println!("{}", panel.view());
                }

                _ = ticker.tick() => {
                    if !panel.tick(Instant::now()).is_empty() {
                        println!("{}", panel.view());
                    }
                }

                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    let command = match line.parse::<PanelCommand>() {
                        Ok(command) => command,
                        Err(e) => {
                            println!("{e}");
                            continue;
                        }
                    };
                    if command == PanelCommand::Quit {
                        break;
                    }

                    if let Some(hash) = apply(&mut panel, command).await {
                        watch_receipt(&panel, hash, receipt_tx.clone());
                    }
                    println!("{}", panel.view());
                }
            }
        }

        Ok(())
    }
}

/// Runs a command against the panel. Returns the hash of a broadcast transaction.
async fn apply(panel: &mut Panel, command: PanelCommand) -> Option<TxHash> {
    match command {
        PanelCommand::SelectIndex(n) => report(panel.select_index(n - 1)),
        PanelCommand::SelectSymbol(symbol) => report(panel.select_symbol(&symbol)),
        PanelCommand::Dropdown => panel.toggle_dropdown(),
        PanelCommand::Amount(text) => panel.set_amount(&text),
        PanelCommand::Max => {
            if !panel.set_max() {
                println!("balance not loaded yet, try `refresh`");
            }
        }
        PanelCommand::Submit => match panel.submit().await {
            Submission::Submitted { hash, .. } => return Some(hash),
            Submission::Skipped => println!("nothing to submit"),
            Submission::Connected(_) | Submission::Failed { .. } => {}
        },
        PanelCommand::Copy => {
            if let Err(e) = panel.copy_target_address(&mut Osc52Clipboard::stdout()) {
                warn!(error = %e, "copy failed");
            }
            println!();
        }
        PanelCommand::Connect => match panel.connect() {
            Ok(_) => panel.refresh().await,
            Err(e) => println!("{e}"),
        },
        PanelCommand::Disconnect => panel.disconnect(),
        PanelCommand::Account => match panel.wallet().open_account_modal() {
            Some(account) => println!("account: {}", account.address),
            None => println!("not connected"),
        },
        PanelCommand::Chain => match panel.wallet().open_chain_modal() {
            Some(chain) => println!("network: {} (id={})", chain.name, chain.id),
            None => println!("not connected"),
        },
        PanelCommand::Refresh => panel.refresh().await,
        PanelCommand::Help => println!("{HELP}"),
        PanelCommand::Quit => {}
    }

    None
}

fn report(result: eyre::Result<()>) {
    if let Err(e) = result {
        println!("{e}");
    }
}

/// Waits for the receipt off the input loop and hands the outcome back to it.
fn watch_receipt(
    panel: &Panel,
    hash: TxHash,
    receipt_tx: mpsc::UnboundedSender<(TxHash, eyre::Result<TxOutcome>)>,
) {
    let ledger = panel.ledger().clone();
    if let Some(url) = ledger.chain().explorer_tx_url(&hash) {
        info!(tx.hash = %hash, %url, "waiting for confirmation");
    }

    tokio::spawn(async move {
        let outcome = ledger.wait_for_receipt(hash).await;
        if receipt_tx.send((hash, outcome)).is_err() {
            warn!(tx.hash = %hash, "panel closed before the receipt arrived");
        }
    });
}
