use bridge_core::{action::MigrateMethod, config::Config};
use color_eyre::eyre::{self, Context as _};

#[derive(clap::Args, Debug)]
pub(crate) struct Tokens {
    /// Print the list as JSON
    #[clap(long)]
    pub json: bool,
}

impl Tokens {
    pub(crate) fn run(&self, config: &Config) -> eyre::Result<()> {
        let tokens = config.token_list()?;

        if self.json {
            let json =
                serde_json::to_string_pretty(&tokens).wrap_err("failed to serialize token list")?;
            println!("{json}");
            return Ok(());
        }

        println!("{} tokens convertible into {}:", tokens.len(), config.new_token.symbol);
        for (i, token) in tokens.iter().enumerate() {
            let method = MigrateMethod::for_token(&tokens, token.address);
            println!(
                "  {}. {:<20} {}  decimals={}  via {}",
                i + 1,
                token.label(),
                token.address,
                token.decimals,
                method
            );
        }

        Ok(())
    }
}
