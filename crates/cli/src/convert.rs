use bridge_core::{
    action::Action,
    config::Config,
    ledger::TxOutcome,
    panel::Submission,
};
use color_eyre::eyre::{self, bail};
use tracing::info;

use crate::cli::build_panel;

/// Connect, approve and migrate are each pressed at most once.
const MAX_STEPS: usize = 3;

#[derive(clap::Args, Debug)]
pub(crate) struct Convert {
    /// Symbol of the token to convert
    #[clap(long)]
    pub token: String,

    /// Amount in whole tokens, e.g. `12.5`
    #[clap(long, required_unless_present = "max", conflicts_with = "max")]
    pub amount: Option<String>,

    /// Convert the full balance
    #[clap(long)]
    pub max: bool,
}

impl Convert {
    pub(crate) async fn run(&self, config: &Config) -> eyre::Result<()> {
        let mut panel = build_panel(config)?;
        panel.select_symbol(&self.token)?;
        panel.refresh().await;

        match &self.amount {
            Some(amount) => panel.set_amount(amount),
            None => {
                if !panel.set_max() {
                    bail!("balance of {} is unavailable", panel.active_token().symbol);
                }
            }
        }

        for _ in 0..MAX_STEPS {
            match panel.submit().await {
                Submission::Skipped => bail!("nothing to convert, amount is zero"),
                Submission::Failed { action } => bail!("{action} failed"),
                Submission::Connected(address) => {
                    info!(%address, "wallet connected");
                }
                Submission::Submitted { action, hash } => {
                    if let Some(url) = panel.ledger().chain().explorer_tx_url(&hash) {
                        info!(%action, %url, "follow the transaction on the explorer");
                    }

                    let outcome = panel.wait_for_receipt(hash).await;
                    let confirmed = matches!(outcome, Ok(TxOutcome::Confirmed));
                    panel.on_receipt(hash, outcome).await;

                    if !confirmed {
                        bail!("{action} transaction {hash} did not confirm");
                    }
                    if action == Action::Migrate {
                        println!("{}", panel.view());
                        return Ok(());
                    }
                }
            }
        }

        bail!("conversion did not complete")
    }
}
