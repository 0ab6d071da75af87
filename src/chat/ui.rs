//! Chat mode UI components.

use std::path::Path;

use crate::config::ResolvedConfig;
use crate::i18n::LanguageProvider;
use crate::store::Cart;
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_LINES: &[(&str, &str)] = &[
    ("/add <id>", "Add a product to the cart"),
    ("/cart", "Show the cart"),
    ("/remove <n>", "Remove a cart item by number"),
    ("/image <path>", "Attach a photo to your next message"),
    ("/lang <language>", "Change the storefront language"),
    ("/config", "Show current configuration"),
    ("/help", "Show this help"),
    ("/quit", "Exit the concierge"),
];

/// Strings shown by the REPL, prefetched whenever the language changes.
pub fn ui_texts() -> Vec<&'static str> {
    let mut texts = vec![
        "Concierge",
        "Ask about our products, or share a photo of your room.",
        "Type a message, /help for commands, Ctrl+C to quit",
        "Thinking...",
        "Goodbye!",
        "Available commands",
        "Configuration",
        "Your cart is empty.",
        "Your cart",
        "Total",
        "Added to your cart:",
        "Removed from your cart:",
        "Photo attached:",
        "Image saved to",
        "Language set to",
    ];
    texts.extend(HELP_LINES.iter().map(|(_, description)| *description));
    texts
}

pub fn print_header(provider: &LanguageProvider) {
    println!(
        "{} {} - {}",
        Style::header("Aura"),
        Style::version(format!("v{VERSION}")),
        provider.t("Concierge")
    );
    println!(
        "{}",
        Style::secondary(provider.t("Ask about our products, or share a photo of your room."))
    );
    println!();
}

pub fn print_goodbye(provider: &LanguageProvider) {
    println!("{}", Style::success(provider.t("Goodbye!")));
}

pub fn print_reply(text: &str) {
    println!("{} {text}", Style::header("Aura:"));
    println!();
}

pub fn print_saved_image(provider: &LanguageProvider, path: &Path) {
    println!(
        "{} {}",
        Style::secondary(provider.t("Image saved to")),
        Style::value(path.display())
    );
    println!();
}

pub fn print_config(config: &ResolvedConfig, language: &str) {
    println!("{}", Style::header("Configuration"));
    println!(
        "  {}     {}",
        Style::label("provider"),
        Style::value(&config.provider_name)
    );
    println!(
        "  {}        {}",
        Style::label("model"),
        Style::value(&config.model)
    );
    println!(
        "  {}  {}",
        Style::label("image_model"),
        Style::value(&config.image_model)
    );
    println!(
        "  {}     {}",
        Style::label("language"),
        Style::value(language)
    );
    println!(
        "  {}     {}",
        Style::label("endpoint"),
        Style::secondary(&config.endpoint)
    );
    println!();
}

pub fn print_help(provider: &LanguageProvider) {
    println!("{}", Style::header(provider.t("Available commands")));
    for (command, description) in HELP_LINES {
        println!(
            "  {}  {}",
            Style::command(format!("{command:<16}")),
            Style::secondary(provider.t(description))
        );
    }
    println!();
}

pub fn print_cart(provider: &LanguageProvider, cart: &Cart) {
    if cart.is_empty() {
        println!("{}", Style::secondary(provider.t("Your cart is empty.")));
        println!();
        return;
    }

    println!("{}", Style::header(provider.t("Your cart")));
    for (i, product) in cart.items().iter().enumerate() {
        println!(
            "  {}. {}  {}",
            i + 1,
            Style::value(provider.t(product.name)),
            Style::price(format!("{:.2} USD", product.price_usd))
        );
    }
    println!(
        "  {} {}",
        Style::label(provider.t("Total")),
        Style::price(format!("{:.2} USD", cart.total_usd()))
    );
    println!();
}

pub fn print_success(message: &str) {
    println!("{} {message}", Style::success("✓"));
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
