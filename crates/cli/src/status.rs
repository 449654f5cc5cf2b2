use bridge_core::config::Config;
use color_eyre::eyre;

use crate::cli::build_panel;

#[derive(clap::Args, Debug)]
pub(crate) struct Status {
    /// Symbol of the token to inspect, defaults to the first listed token
    #[clap(long)]
    pub token: Option<String>,

    /// Amount to evaluate the next action for
    #[clap(long)]
    pub amount: Option<String>,
}

impl Status {
    pub(crate) async fn run(&self, config: &Config) -> eyre::Result<()> {
        let mut panel = build_panel(config)?;

        if let Some(symbol) = &self.token {
            panel.select_symbol(symbol)?;
        }
        if let Some(amount) = &self.amount {
            panel.set_amount(amount);
        }
        panel.refresh().await;

        println!("{}", panel.view());
        Ok(())
    }
}
