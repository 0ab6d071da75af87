use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::concierge::ConciergeSession;
use crate::config::ResolvedConfig;
use crate::fs::save_image;
use crate::i18n::{LanguageProvider, SpinnerOverlay, TranslationLoader};
use crate::input::read_image;
use crate::llm::ModelClient;
use crate::paths;
use crate::store::{Cart, find_product};
use crate::ui::{Spinner, Style};

/// An interactive conversation with the concierge.
///
/// Holds the cart and a pending photo attachment alongside the
/// conversation itself.
pub struct ChatSession {
    config: ResolvedConfig,
    concierge: ConciergeSession,
    provider: LanguageProvider,
    cart: Cart,
    attachment: Option<Vec<u8>>,
    images_dir: PathBuf,
}

impl ChatSession {
    pub fn new(config: ResolvedConfig, client: Arc<dyn ModelClient>) -> Self {
        let provider =
            LanguageProvider::new(Arc::clone(&client), &config.language, config.translate_debounce);
        Self {
            config,
            concierge: ConciergeSession::new(client),
            provider,
            cart: Cart::new(),
            attachment: None,
            images_dir: paths::images_dir(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.load_translations().await;
        ui::print_header(&self.provider);

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        // Non-highlighted suggestions: gray
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        // Highlighted suggestion: purple
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let help = self
                .provider
                .t("Type a message, /help for commands, Ctrl+C to quit");
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message(&help)
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd).await {
                            break;
                        }
                    }
                    Input::Text(text) => self.send(&text).await,
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!(); // Clear line before goodbye message
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye(&self.provider);
        Ok(())
    }

    async fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Add(id) => self.add_to_cart(id.as_deref()),
            SlashCommand::Cart => ui::print_cart(&self.provider, &self.cart),
            SlashCommand::Config => ui::print_config(&self.config, &self.provider.language()),
            SlashCommand::Help => ui::print_help(&self.provider),
            SlashCommand::Image(path) => self.attach_image(path.as_deref()),
            SlashCommand::Lang(language) => self.set_language(language.as_deref()).await,
            SlashCommand::Quit => return false,
            SlashCommand::Remove(index) => self.remove_from_cart(index.as_deref()),
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
        }
        true
    }

    async fn send(&mut self, text: &str) {
        let image = self.attachment.take();

        let spinner = Spinner::new(&self.provider.t("Thinking..."));
        let reply = self.concierge.send(text, image).await;
        spinner.stop();

        ui::print_reply(&reply.text);

        if let Some(image) = reply.image {
            match save_image(&self.images_dir, &image) {
                Ok(path) => ui::print_saved_image(&self.provider, &path),
                Err(e) => ui::print_error(&format!("{e:#}")),
            }
        }
    }

    fn add_to_cart(&mut self, id: Option<&str>) {
        let Some(id) = id else {
            ui::print_error("Usage: /add <product-id>  (see 'aura catalog')");
            return;
        };
        let Some(product) = find_product(id) else {
            ui::print_error(&format!("Unknown product: {id}"));
            return;
        };

        self.cart.add(product);
        ui::print_success(&format!(
            "{} {}",
            self.provider.t("Added to your cart:"),
            Style::value(self.provider.t(product.name))
        ));
    }

    fn remove_from_cart(&mut self, index: Option<&str>) {
        let removed = index
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.cart.remove(i));

        match removed {
            Some(product) => ui::print_success(&format!(
                "{} {}",
                self.provider.t("Removed from your cart:"),
                Style::value(self.provider.t(product.name))
            )),
            None => ui::print_error(&format!(
                "Usage: /remove <n>  (1-{})",
                self.cart.len().max(1)
            )),
        }
    }

    fn attach_image(&mut self, path: Option<&str>) {
        let Some(path) = path else {
            ui::print_error("Usage: /image <path>");
            return;
        };

        match read_image(&expand_home(path)) {
            Ok(image) => {
                self.attachment = Some(image);
                ui::print_success(&format!(
                    "{} {}",
                    self.provider.t("Photo attached:"),
                    Style::value(path)
                ));
            }
            Err(e) => ui::print_error(&format!("{e:#}")),
        }
    }

    async fn set_language(&mut self, language: Option<&str>) {
        let Some(language) = language else {
            println!("{}", Style::value(self.provider.language()));
            println!();
            return;
        };

        if let Err(e) = self.provider.set_language(language) {
            ui::print_error(&e.to_string());
            return;
        }
        self.load_translations().await;

        let language = self.provider.language();
        ui::print_success(&format!(
            "{} {}",
            self.provider.t("Language set to"),
            Style::value(language)
        ));
    }

    /// Translates the REPL's own strings before they are shown.
    async fn load_translations(&self) {
        let loader = TranslationLoader::spawn(
            self.provider.subscribe(),
            SpinnerOverlay::new(format!("Translating to {}...", self.provider.language())),
        );
        self.provider.prefetch(ui::ui_texts()).await;
        drop(loader);
    }
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    Path::new(path).to_path_buf()
}
