//! POST / — on-demand gift ideas for a named person.

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::UPCOMING_EVENTS_LABEL;
use crate::models::notification::{NotificationPayload, Recipient, GIFT_IDEAS_TEMPLATE};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GiftIdeasResponse {
    pub message: &'static str,
    pub query: BTreeMap<String, String>,
}

/// Checks the shared secret, generates suggestions, then hands the
/// notification off without waiting for it. The reply echoes the query.
pub async fn handle_gift_ideas(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<Json<GiftIdeasResponse>, AppError> {
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| key == &*state.security_key);
    if !authorized {
        return Err(AppError::InvalidSecurityKey);
    }

    let param = |key: &str| query.get(key).filter(|v| !v.is_empty()).cloned();
    let (Some(email), Some(name), Some(interests)) =
        (param("email"), param("name"), param("interests"))
    else {
        return Err(AppError::MissingParameters { query });
    };

    let suggestions = state
        .suggestions
        .suggest(&name, UPCOMING_EVENTS_LABEL, &interests)
        .await?;

    // The response does not wait on (or report) the notification outcome.
    let notifier = state.notifier.clone();
    tokio::spawn(async move {
        let recipient = Recipient::email(&email);
        let payload = NotificationPayload::gift_ideas(&name, suggestions);
        match notifier
            .dispatch(GIFT_IDEAS_TEMPLATE, &recipient, &payload)
            .await
        {
            Ok(_) => info!("Sent gift ideas for {name} to {email}"),
            Err(e) => warn!("Gift ideas notification to {email} failed: {e}"),
        }
    });

    Ok(Json(GiftIdeasResponse {
        message: "Sent!",
        query,
    }))
}
