use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/add", "Add a product to the cart"),
    ("/cart", "Show the cart"),
    ("/config", "Show current configuration"),
    ("/help", "Show available commands"),
    ("/image", "Attach a photo to your next message"),
    ("/lang", "Change the storefront language"),
    ("/quit", "Exit the concierge"),
    ("/remove", "Remove a cart item by number"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') || input.contains(' ') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

/// Slash command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Add(Option<String>),
    Cart,
    Config,
    Help,
    Image(Option<String>),
    Lang(Option<String>),
    Quit,
    Remove(Option<String>),
    Unknown(String),
}

/// Input types
#[derive(Debug)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Text(input.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let (name, rest) = cmd
        .split_once(char::is_whitespace)
        .map_or((cmd, ""), |(name, rest)| (name, rest.trim()));
    let argument = (!rest.is_empty()).then(|| rest.to_string());

    let command = match name {
        "add" => SlashCommand::Add(argument),
        "cart" => SlashCommand::Cart,
        "config" => SlashCommand::Config,
        "help" => SlashCommand::Help,
        "image" => SlashCommand::Image(argument),
        "lang" | "language" => SlashCommand::Lang(argument),
        "quit" | "exit" | "q" => SlashCommand::Quit,
        "remove" | "rm" => SlashCommand::Remove(argument),
        _ => SlashCommand::Unknown(cmd.trim().to_string()),
    };

    Input::Command(command)
}
