//! The top-level menu.
//!
//! The menu is the outer loop of the application. Each pass redraws the
//! banner with the credential status, reads a choice, and either runs a chat
//! session, stores a new credential, shows the about screen or exits.

use crate::chat::config::ChatConfig;
use crate::chat::input::Input;
use crate::chat::session::ChatSession;
use crate::client::CompletionClient;
use crate::credentials::CredentialStore;
use crate::error::{Error, Result};
use crate::render::Renderer;

const MENU_PROMPT: &str = "Select option: ";
const SECRET_PROMPT: &str = "Enter API Key: ";
const CONTINUE_PROMPT: &str = "Press Enter to continue...";
const RETURN_PROMPT: &str = "Press Enter to return...";

/// One of the four menu options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Start a chat session.
    RunChat,
    /// Enter and store the API key.
    SetCredential,
    /// Show the about screen.
    About,
    /// Leave the application.
    Exit,
}

impl MenuChoice {
    /// Parses the trimmed option number.
    ///
    /// ```
    /// # use delulu::chat::MenuChoice;
    /// assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::RunChat));
    /// assert_eq!(MenuChoice::parse("5"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::RunChat),
            "2" => Some(MenuChoice::SetCredential),
            "3" => Some(MenuChoice::About),
            "4" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// The main menu, owning the client and configuration for every session.
pub struct Menu<C: CompletionClient> {
    client: C,
    credentials: CredentialStore,
    config: ChatConfig,
}

impl<C: CompletionClient> Menu<C> {
    /// Creates a menu that stores its credential where `config` says.
    pub fn new(client: C, config: ChatConfig) -> Self {
        let credentials = CredentialStore::new(config.credential_path.clone());
        Self {
            client,
            credentials,
            config,
        }
    }

    /// Returns the credential store.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Runs the menu until the user exits or input ends.
    ///
    /// The credential is read from disk again on every pass so the status
    /// badge always reflects the file.
    pub async fn run(&self, input: &mut dyn Input, renderer: &mut dyn Renderer) -> Result<()> {
        loop {
            renderer.clear_screen();
            let secret = self.load_secret(renderer);
            renderer.print_banner(secret.is_some());
            renderer.print_menu();

            let Some(line) = input.read_line(MENU_PROMPT)? else {
                renderer.clear_screen();
                return Ok(());
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::RunChat) => self.run_chat(input, renderer).await?,
                Some(MenuChoice::SetCredential) => self.set_credential(input, renderer)?,
                Some(MenuChoice::About) => {
                    renderer.clear_screen();
                    renderer.print_about(env!("CARGO_PKG_VERSION"));
                    input.pause(RETURN_PROMPT)?;
                }
                Some(MenuChoice::Exit) => {
                    renderer.clear_screen();
                    return Ok(());
                }
                None => {
                    renderer.print_error("Invalid option.");
                    input.pause(CONTINUE_PROMPT)?;
                }
            }
        }
    }

    async fn run_chat(&self, input: &mut dyn Input, renderer: &mut dyn Renderer) -> Result<()> {
        let Some(secret) = self.load_secret(renderer) else {
            renderer.print_error("API key not configured.");
            return input.pause(CONTINUE_PROMPT);
        };
        let mut session = ChatSession::new(&self.client, secret, &self.config);
        session.run(input, renderer).await
    }

    fn set_credential(&self, input: &mut dyn Input, renderer: &mut dyn Renderer) -> Result<()> {
        let Some(secret) = input.read_secret(SECRET_PROMPT)? else {
            return Ok(());
        };
        match self.credentials.save(&secret) {
            Ok(()) => renderer.print_info("API Key saved."),
            Err(Error::Validation { message, .. }) => renderer.print_error(&message),
            Err(err) => renderer.print_error(&format!("Failed to save API key: {err}")),
        }
        input.pause(CONTINUE_PROMPT)
    }

    fn load_secret(&self, renderer: &mut dyn Renderer) -> Option<String> {
        match self.credentials.load() {
            Ok(secret) => secret,
            Err(err) => {
                renderer.print_error(&format!("Failed to read API key: {err}"));
                None
            }
        }
    }
}
