use anyhow::Result;
use clap::Parser;

use aura_cli::cli::commands::{catalog, chat, configure, providers, ship};
use aura_cli::cli::{Args, Command};
use aura_cli::config::ResolveOptions;
use aura_cli::i18n::print_languages;
use aura_cli::output::{self, OutputConfig};
use aura_cli::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || OutputConfig::default().no_color,
        verbose: args.verbose,
    });

    if let Err(e) = run(args).await {
        eprintln!("{} {e:#}", Style::error("Error:"));
        std::process::exit(exitcode::SOFTWARE);
    }
}

async fn run(args: Args) -> Result<()> {
    let options = ResolveOptions {
        provider: args.provider,
        model: args.model,
        language: args.lang,
    };

    match args.command {
        Command::Catalog => catalog::run_catalog(&options).await?,
        Command::Ship { postal_code } => ship::run_ship(postal_code, &options).await?,
        Command::Chat => chat::run_chat(&options).await?,
        Command::Languages => print_languages(),
        Command::Providers { provider } => providers::print_providers(provider.as_deref())?,
        Command::Configure { show } => configure::run_configure(show)?,
    }

    Ok(())
}
