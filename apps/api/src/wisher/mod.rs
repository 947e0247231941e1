//! Daily scan — finds today's birthdays and anniversaries and wishes them.
//!
//! Flow: fetch all contacts once → split into birthday and anniversary
//! matches → for each match, in order: pick a message → suggest gifts →
//! dispatch `wish-notif`.
//!
//! Strictly sequential. The first failure aborts the rest of the run, and
//! nothing records who was already wished, so a second run on the same day
//! sends everything again.

pub mod phrases;
pub mod scheduler;

use chrono::NaiveDate;
use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::contacts::RepositoryError;
use crate::llm_client::GenerationError;
use crate::models::contact::{Contact, EventKind};
use crate::models::notification::{NotificationPayload, Recipient, WISH_TEMPLATE};
use crate::notify::DispatchError;
use crate::state::AppState;
use crate::wisher::phrases::pick_message;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("contact repository: {0}")]
    Repository(#[from] RepositoryError),

    #[error("suggestion generation: {0}")]
    Generation(#[from] GenerationError),

    #[error("notification dispatch: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Contacts whose event falls on the scan date. A contact with both dates
/// on the same day shows up in both lists.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Matches {
    pub birthdays: Vec<Contact>,
    pub anniversaries: Vec<Contact>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub birthdays: usize,
    pub anniversaries: usize,
}

pub fn todays_matches(contacts: &[Contact], today: NaiveDate) -> Matches {
    let matching = |event| {
        contacts
            .iter()
            .filter(|c| c.occurs_on(event, today))
            .cloned()
            .collect::<Vec<_>>()
    };

    Matches {
        birthdays: matching(EventKind::Birthday),
        anniversaries: matching(EventKind::Anniversary),
    }
}

/// Runs one scan for `today`. Birthdays are wished first, then anniversaries.
pub async fn run_daily_scan<R: Rng>(
    state: &AppState,
    today: NaiveDate,
    rng: &mut R,
) -> Result<ScanReport, ScanError> {
    info!("It's a new day, let's wish some people!");

    let contacts = state.contacts.fetch_all().await?;
    let matches = todays_matches(&contacts, today);
    info!(
        "{} birthday(s) and {} anniversary(ies) on {}",
        matches.birthdays.len(),
        matches.anniversaries.len(),
        today.format("%m-%d")
    );

    for contact in &matches.birthdays {
        wish(state, contact, EventKind::Birthday, &mut *rng).await?;
    }
    for contact in &matches.anniversaries {
        wish(state, contact, EventKind::Anniversary, &mut *rng).await?;
    }

    Ok(ScanReport {
        birthdays: matches.birthdays.len(),
        anniversaries: matches.anniversaries.len(),
    })
}

async fn wish<R: Rng>(
    state: &AppState,
    contact: &Contact,
    event: EventKind,
    rng: &mut R,
) -> Result<(), ScanError> {
    let message = pick_message(event, rng);
    let suggestions = state
        .suggestions
        .suggest(&contact.name, event.label(), contact.interests_text())
        .await?;

    state
        .notifier
        .dispatch(
            WISH_TEMPLATE,
            &Recipient::email(&contact.email),
            &NotificationPayload::wish(&contact.name, event.label(), message, suggestions),
        )
        .await?;

    info!("Wished {} a happy {}", contact.name, event.label());
    Ok(())
}
