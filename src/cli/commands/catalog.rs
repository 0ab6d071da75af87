use anyhow::Result;

use super::{connect, load_config};
use crate::config::{ConfigManager, ResolveOptions, resolve_language_setting};
use crate::i18n::{LanguageProvider, SpinnerOverlay, TranslationLoader, is_english};
use crate::store::{CATALOG, Product};
use crate::ui::Style;

const TAGLINE: &str = "Quiet living";
const HEADING: &str = "Our products";
const PRICE_NOTE: &str = "Prices in USD. Use 'aura ship' to estimate delivery.";

/// Every catalog string that goes through translation.
fn catalog_texts() -> Vec<&'static str> {
    let mut texts = vec![TAGLINE, HEADING, PRICE_NOTE];
    for product in CATALOG {
        texts.extend([product.name, product.category, product.description]);
    }
    texts
}

pub async fn run_catalog(options: &ResolveOptions) -> Result<()> {
    let config_file = ConfigManager::new().load_or_default()?;
    let language = resolve_language_setting(options, &config_file)?;

    // English needs no model, so no credentials either.
    if is_english(language) {
        print_catalog(|text| text.to_string());
        return Ok(());
    }

    let config = load_config(options)?;
    let provider = LanguageProvider::new(connect(&config), language, config.translate_debounce);

    let loader = TranslationLoader::spawn(
        provider.subscribe(),
        SpinnerOverlay::new(format!("Translating the catalog to {language}...")),
    );
    provider.prefetch(catalog_texts()).await;
    drop(loader);

    print_catalog(|text| provider.t(text));
    Ok(())
}

fn print_catalog(t: impl Fn(&str) -> String) {
    println!("{} {}", Style::header("Aura"), Style::secondary(t(TAGLINE)));
    println!();
    println!("{}", Style::header(t(HEADING)));
    for product in CATALOG {
        print_product(product, &t);
    }
    println!();
    println!("{}", Style::secondary(t(PRICE_NOTE)));
}

fn print_product(product: &Product, t: &impl Fn(&str) -> String) {
    println!();
    println!(
        "  {}  {}  {}",
        Style::value(t(product.name)),
        Style::price(format!("{:.2} USD", product.price_usd)),
        Style::secondary(format!("[{}]", t(product.category)))
    );
    println!("  {}", t(product.description));
    println!("  {}", Style::code(product.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::EXEMPT_TEXTS;

    #[test]
    fn test_catalog_texts_cover_every_product() {
        let texts = catalog_texts();
        assert_eq!(texts.len(), 3 + CATALOG.len() * 3);
        assert!(texts.contains(&"Halo Lamp"));
        assert!(texts.contains(&"Accessories"));
    }

    #[test]
    fn test_tagline_is_exempt() {
        assert!(EXEMPT_TEXTS.contains(&TAGLINE));
    }
}
