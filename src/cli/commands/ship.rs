use anyhow::{Result, bail};
use inquire::autocompletion::{Autocomplete, Replacement};
use inquire::{Select, Text};
use std::sync::Arc;
use tokio::sync::watch;

use super::{connect, load_config};
use crate::config::ResolveOptions;
use crate::i18n::{LanguageProvider, SpinnerOverlay, TranslationLoader};
use crate::shipping::{Location, MIN_QUERY_LEN, ShippingEstimator, ShippingQuote, ZipLookup};
use crate::ui::{Spinner, Style, handle_prompt_cancellation};

const SHIP_TEXTS: &[&str] = &[
    "Postal code:",
    "Type at least 3 characters. Matches appear as you type.",
    "Looking up postal code...",
    "matching locations",
    "Select your location:",
    "No matching locations found.",
    "Estimating shipping...",
    "Shipping to",
    "Flat fee",
    "Distance fee",
    "Customs",
    "Total",
    "Distance",
    "Live estimate unavailable. A flat rate was applied.",
];

/// Feeds keystrokes to the debounced lookup and offers its latest matches.
#[derive(Clone)]
struct ZipCompleter {
    lookup: ZipLookup,
    suggestions: watch::Receiver<Vec<Location>>,
}

impl ZipCompleter {
    fn new(lookup: ZipLookup) -> Self {
        let suggestions = lookup.subscribe();
        Self {
            lookup,
            suggestions,
        }
    }
}

impl Autocomplete for ZipCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        self.lookup.on_input(input);
        Ok(self
            .suggestions
            .borrow_and_update()
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        Ok(highlighted_suggestion)
    }
}

pub async fn run_ship(postal_code: Option<String>, options: &ResolveOptions) -> Result<()> {
    handle_prompt_cancellation(ship(postal_code, options).await)
}

async fn ship(postal_code: Option<String>, options: &ResolveOptions) -> Result<()> {
    let config = load_config(options)?;
    let client = connect(&config);
    let provider =
        LanguageProvider::new(Arc::clone(&client), &config.language, config.translate_debounce);

    let loader = TranslationLoader::spawn(
        provider.subscribe(),
        SpinnerOverlay::new(format!("Translating to {}...", config.language)),
    );
    provider.prefetch(SHIP_TEXTS.iter().copied()).await;
    drop(loader);

    let zip = ZipLookup::new(Arc::clone(&client), config.zip_debounce);
    let candidates = match postal_code {
        Some(code) => lookup_code(&zip, &provider, &code).await?,
        None => prompt_postal_code(&zip, &provider).await?,
    };

    let Some(location) = choose_location(candidates, &provider)? else {
        println!("{}", Style::warning(provider.t("No matching locations found.")));
        return Ok(());
    };

    let estimator = ShippingEstimator::new(client);
    let spinner = Spinner::new(&provider.t("Estimating shipping..."));
    let quote = estimator.estimate(&location).await;
    spinner.stop();

    print_quote(&location, &quote, |text| provider.t(text));
    Ok(())
}

async fn lookup_code(
    zip: &ZipLookup,
    provider: &LanguageProvider,
    code: &str,
) -> Result<Vec<Location>> {
    let code = code.trim();
    if code.chars().count() < MIN_QUERY_LEN {
        bail!("Postal code '{code}' is too short (enter at least {MIN_QUERY_LEN} characters)");
    }

    let spinner = Spinner::new(&provider.t("Looking up postal code..."));
    let locations = zip.lookup(code).await;
    spinner.stop();

    crate::status!(
        "{}",
        Style::secondary(format!(
            "{} {}",
            locations.len(),
            provider.t("matching locations")
        ))
    );
    Ok(locations)
}

async fn prompt_postal_code(
    zip: &ZipLookup,
    provider: &LanguageProvider,
) -> Result<Vec<Location>> {
    let message = provider.t("Postal code:");
    let help = provider.t("Type at least 3 characters. Matches appear as you type.");
    let answer = Text::new(&message)
        .with_autocomplete(ZipCompleter::new(zip.clone()))
        .with_help_message(&help)
        .prompt()?;

    if let Some(location) = find_suggestion(&zip.suggestions(), &answer) {
        return Ok(vec![location]);
    }
    lookup_code(zip, provider, &answer).await
}

/// Returns the suggestion whose display text the user accepted.
fn find_suggestion(suggestions: &[Location], answer: &str) -> Option<Location> {
    let answer = answer.trim();
    suggestions
        .iter()
        .find(|location| location.to_string() == answer)
        .cloned()
}

fn choose_location(
    mut candidates: Vec<Location>,
    provider: &LanguageProvider,
) -> Result<Option<Location>> {
    match candidates.len() {
        0 => Ok(None),
        1 => Ok(candidates.pop()),
        _ => {
            let message = provider.t("Select your location:");
            Ok(Some(Select::new(&message, candidates).prompt()?))
        }
    }
}

/// Label and amount for each line of the breakdown.
fn quote_lines(quote: &ShippingQuote, t: &impl Fn(&str) -> String) -> Vec<(String, String)> {
    let mut lines = vec![(t("Flat fee"), quote.display(quote.flat_fee))];
    if !quote.fallback {
        lines.push((t("Distance fee"), quote.display(quote.distance_fee)));
        lines.push((t("Customs"), quote.display(quote.customs_fee)));
        lines.push((t("Distance"), format!("{:.0} km", quote.distance_km)));
    }
    lines
}

fn print_quote(location: &Location, quote: &ShippingQuote, t: impl Fn(&str) -> String) {
    println!(
        "{} {}",
        Style::header(t("Shipping to")),
        Style::value(location)
    );
    for (label, amount) in quote_lines(quote, &t) {
        println!("  {} {}", Style::label(format!("{label:<14}")), amount);
    }
    println!(
        "  {} {}",
        Style::label(format!("{:<14}", t("Total"))),
        Style::price(quote.display(quote.total))
    );

    if quote.fallback {
        println!();
        println!(
            "{}",
            Style::warning(t("Live estimate unavailable. A flat rate was applied."))
        );
    }
}
