use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "aura")]
#[command(about = "Aura storefront: catalog, shipping estimates and an AI concierge")]
#[command(version)]
pub struct Args {
    /// Storefront language (code or name, e.g. fr, French)
    #[arg(short = 'l', long = "lang", global = true)]
    pub lang: Option<String>,

    /// Provider name (as configured in config.toml)
    #[arg(short = 'p', long, global = true)]
    pub provider: Option<String>,

    /// Chat model name
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    /// Suppress spinners and status messages
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log requests and background work to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the product catalog
    Catalog,
    /// Estimate shipping to a postal code
    Ship {
        /// Postal code (prompts with suggestions if omitted)
        postal_code: Option<String>,
    },
    /// Talk to the Aura concierge
    Chat,
    /// List supported languages
    Languages,
    /// List configured providers
    Providers {
        /// Show details for a specific provider
        provider: Option<String>,
    },
    /// Configure default settings
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
