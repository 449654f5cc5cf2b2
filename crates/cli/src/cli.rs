use std::path::PathBuf;

use bridge_core::{
    config::{Config, DEFAULT_CONFIG_FILE},
    ledger::RpcLedger,
    panel::ConversionPanel,
    wallet::{LocalWallet, WalletConnector as _},
};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, Context as _};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{clipboard::Osc52Clipboard, convert, session, status, tokens};

pub(crate) type Panel = ConversionPanel<LocalWallet, RpcLedger>;

#[derive(Parser)]
#[command(name = "bridge", about = "Convert legacy tokens into FINTYH Coin (FTC) at 1:1")]
pub(crate) struct Cli {
    /// Path of the YAML configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub(crate) config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tokens that can be converted
    Tokens(tokens::Tokens),

    /// Show balance, allowance and the next action for a token
    Status(status::Status),

    /// Approve if needed, then convert
    Convert(convert::Convert),

    /// Copy the FTC contract address to the clipboard
    CopyAddress,

    /// Interactive conversion panel
    Panel(session::Session),
}

impl Cli {
    pub(crate) async fn run(self, config: Config, shutdown_token: CancellationToken) -> eyre::Result<()> {
        match self.command {
            Commands::Tokens(cmd) => cmd.run(&config),
            Commands::Status(cmd) => cmd.run(&config).await,
            Commands::Convert(cmd) => cmd.run(&config).await,
            Commands::CopyAddress => {
                let mut panel = build_panel(&config)?;
                panel
                    .copy_target_address(&mut Osc52Clipboard::stdout())
                    .wrap_err("failed to copy address")?;
                println!();
                println!("{}", panel.view());
                Ok(())
            }
            Commands::Panel(cmd) => cmd.run(&config, shutdown_token).await,
        }
    }
}

/// Wires the local wallet and the RPC ledger into a panel.
pub(crate) fn build_panel(config: &Config) -> eyre::Result<Panel> {
    let chain = config.chain()?;
    let wallet = LocalWallet::new(chain.clone(), config.private_key.as_ref())
        .wrap_err("failed to set up wallet")?;
    let ledger = RpcLedger::connect(chain, wallet.signer().cloned(), config.confirmation)
        .wrap_err("failed to set up rpc client")?;

    let settings = config.panel_settings()?;
    info!(
        tokens = settings.tokens.len(),
        migration_contract = %settings.migration_contract,
        wallet.connected = wallet.is_connected(),
        "🪙 initialized bridge panel"
    );

    Ok(ConversionPanel::new(wallet, ledger, settings))
}
