//! Storefront languages and their lookup by code or name.

use anyhow::Result;

use crate::ui::Style;

/// The source language of every storefront string.
pub const ENGLISH: &str = "English";

/// Supported language codes (ISO 639-1) and their English names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("da", "Danish"),
    ("de", "German"),
    ("en", ENGLISH),
    ("es", "Spanish"),
    ("fr", "French"),
    ("hi", "Hindi"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("nl", "Dutch"),
    ("pt", "Portuguese"),
    ("sv", "Swedish"),
    ("zh", "Chinese"),
];

/// Prints all supported languages to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported languages"));
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("  {:3} {}", Style::code(code), Style::secondary(name));
    }
}

/// Resolves a language code or name (case-insensitive) to its English name.
///
/// # Errors
///
/// Returns an error if the language is not supported.
pub fn resolve_language(input: &str) -> Result<&'static str> {
    let input = input.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(code, name)| code.eq_ignore_ascii_case(input) || name.eq_ignore_ascii_case(input))
        .map(|(_, name)| *name)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Unsupported language: '{input}'\n\n\
                 Use a code or a name, e.g. fr, French, ja, Japanese.\n\
                 Run 'aura languages' to see all supported languages."
            )
        })
}

/// Returns `true` for the source language, which is never translated.
pub fn is_english(language: &str) -> bool {
    language.eq_ignore_ascii_case(ENGLISH) || language.eq_ignore_ascii_case("en")
}
