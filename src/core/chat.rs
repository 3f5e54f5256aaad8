//! The send flow: one user line in, one assistant reply out.

use crate::core::credentials::Credentials;
use crate::core::message::Speaker;
use crate::core::session::SessionStore;
use crate::llm::ModelRunner;

/// Append the user's line to the transcript, ask the model, and append the
/// reply. A runner failure still produces an assistant entry, so the
/// transcript stays consistent and the session stays usable.
///
/// The session lock is not held across the ask: the runner can block for
/// the full request timeout, and only this session should wait on it.
pub async fn submit(
    store: &SessionStore,
    session_id: &str,
    credentials: &Credentials,
    runner: &dyn ModelRunner,
    model: &str,
    text: &str,
) {
    store
        .get_or_create(session_id, credentials)
        .append_message(Speaker::User, text);

    let reply = match runner.ask(model, text).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(model, error = %err, "model invocation failed");
            format!("BuildBuddy hit a problem talking to the model: {err}")
        }
    };

    store
        .get_or_create(session_id, credentials)
        .append_message(Speaker::Assistant, reply);
}
