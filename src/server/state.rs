//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::core::credentials::Credentials;
use crate::core::session::SessionStore;
use crate::llm::ModelRunner;
use crate::server::templates::Pages;

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<Credentials>,
    pub runner: Arc<dyn ModelRunner>,
    pub sessions: Arc<SessionStore>,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(
        credentials: Credentials,
        runner: Arc<dyn ModelRunner>,
    ) -> Result<Self, minijinja::Error> {
        Ok(Self {
            credentials: Arc::new(credentials),
            runner,
            sessions: Arc::new(SessionStore::new()),
            pages: Arc::new(Pages::new()?),
        })
    }
}
