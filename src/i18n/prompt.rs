pub const SYSTEM_PROMPT_TEMPLATE: &str = "You are the localization engine of the Aura storefront. \
     Translate each string in the JSON array from English to {target_language}. \
     Answer with an object whose \"translations\" array has exactly one entry per input string, in the same order. \
     Keep product names, brand names and placeholders unchanged. Use a warm, concise retail tone.";

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_system_prompt(target_language: &str) -> String {
    // {target_language} is a placeholder for string replacement, not a format argument
    SYSTEM_PROMPT_TEMPLATE.replace("{target_language}", target_language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_system_prompt() {
        let prompt = build_system_prompt("French");
        assert!(prompt.contains("to French"));
        assert!(!prompt.contains("{target_language}"));
    }

    #[test]
    fn test_system_prompt_template_has_placeholder() {
        assert!(SYSTEM_PROMPT_TEMPLATE.contains("{target_language}"));
    }
}
