//! Per-action HTTP handlers.
//!
//! Each user action mutates the session and lands back on `/`, so the page
//! is always re-rendered from the latest session state. The model list is
//! refreshed on every page render so newly installed models appear without
//! a restart.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::core::chat;
use crate::core::session::AuthError;
use crate::server::error::AppError;
use crate::server::extract::SessionId;
use crate::server::state::AppState;
use crate::server::templates::ChatView;

#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Deserialize)]
pub struct SendForm {
    #[serde(default)]
    model: String,
    #[serde(default)]
    message: String,
}

/// GET / - the login page, or the chat page once authenticated.
pub async fn index(
    State(state): State<AppState>,
    session_id: SessionId,
) -> Result<Response, AppError> {
    // Copy what the page needs out of the session so the store entry is not
    // held across the model-list fetch.
    let (logged_in, username, role, transcript, input_counter) = {
        let session = state
            .sessions
            .get_or_create(&session_id.id, &state.credentials);
        (
            session.logged_in,
            session.username.clone(),
            session.role,
            session.transcript.clone(),
            session.input_counter,
        )
    };

    let page = if logged_in {
        let models = state.runner.list_models().await;
        let view = ChatView {
            username: username.as_deref().unwrap_or(""),
            role: role.map(|role| role.as_str()).unwrap_or(""),
            models: &models,
            transcript: &transcript,
            input_counter,
        };
        state
            .pages
            .chat_page(&view)
            .map_err(|err| AppError::Internal(err.to_string()))?
    } else {
        state
            .pages
            .login_page(None, &state.credentials.missing)
            .map_err(|err| AppError::Internal(err.to_string()))?
    };

    Ok((session_id.cookie(), Html(page)).into_response())
}

/// POST /login - authenticate against the two identity records.
pub async fn login(
    State(state): State<AppState>,
    session_id: SessionId,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let result = state
        .sessions
        .get_or_create(&session_id.id, &state.credentials)
        .login(&form.username, &form.password, &state.credentials);

    match result {
        Ok(()) => Ok((session_id.cookie(), Redirect::to("/")).into_response()),
        Err(AuthError) => {
            let page = state
                .pages
                .login_page(Some("Invalid credentials!"), &state.credentials.missing)
                .map_err(|err| AppError::Internal(err.to_string()))?;
            Ok((session_id.cookie(), Html(page)).into_response())
        }
    }
}

/// POST /send - append the user's line, ask the model, append the reply.
pub async fn send(
    State(state): State<AppState>,
    session_id: SessionId,
    Form(form): Form<SendForm>,
) -> Result<Response, AppError> {
    let logged_in = state
        .sessions
        .get_or_create(&session_id.id, &state.credentials)
        .logged_in;
    if !logged_in {
        return Err(AppError::Unauthorized);
    }

    let text = form.message.trim();
    if !text.is_empty() {
        if form.model.is_empty() {
            return Err(AppError::Validation("no model selected".to_string()));
        }
        chat::submit(
            &state.sessions,
            &session_id.id,
            &state.credentials,
            state.runner.as_ref(),
            &form.model,
            text,
        )
        .await;
    }

    Ok((session_id.cookie(), Redirect::to("/")).into_response())
}

/// POST /logout - full session reset; nothing leaks into the next login.
pub async fn logout(State(state): State<AppState>, session_id: SessionId) -> Response {
    state
        .sessions
        .get_or_create(&session_id.id, &state.credentials)
        .logout();
    (session_id.cookie(), Redirect::to("/")).into_response()
}

/// GET /health - liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
