use std::sync::Arc;

use crate::contacts::ContactRepository;
use crate::llm_client::SuggestionGenerator;
use crate::notify::NotificationDispatcher;

/// Client handles built once at startup and shared by the daily scan and
/// the HTTP handlers for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<dyn ContactRepository>,
    pub suggestions: Arc<dyn SuggestionGenerator>,
    pub notifier: Arc<dyn NotificationDispatcher>,
    /// Shared secret for `POST /`.
    pub security_key: Arc<str>,
}
