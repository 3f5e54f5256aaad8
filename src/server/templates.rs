//! Server-rendered pages.
//!
//! The whole UI is two full-page templates; every user action re-renders
//! one of them from session state. Template names keep their `.html`
//! suffix so minijinja auto-escapes anything interpolated into them.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::core::message::Message;

pub struct Pages {
    env: Environment<'static>,
}

/// Everything the chat page needs from session and runner state.
#[derive(Serialize)]
pub struct ChatView<'a> {
    pub username: &'a str,
    pub role: &'a str,
    pub models: &'a [String],
    pub transcript: &'a [Message],
    pub input_counter: u64,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("login.html", include_str!("templates/login.html"))?;
        env.add_template("chat.html", include_str!("templates/chat.html"))?;
        Ok(Self { env })
    }

    /// Login form, optionally with an inline auth error and the list of
    /// credential variables that fell back to built-in defaults.
    pub fn login_page(
        &self,
        error: Option<&str>,
        defaulted: &[&str],
    ) -> Result<String, minijinja::Error> {
        self.env
            .get_template("login.html")?
            .render(context! { error, defaulted })
    }

    pub fn chat_page(&self, view: &ChatView<'_>) -> Result<String, minijinja::Error> {
        self.env.get_template("chat.html")?.render(view)
    }
}
