//! Shared fakes for the job and endpoint tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::NaiveDate;

use crate::contacts::{ContactRepository, RepositoryError};
use crate::llm_client::{GenerationError, SuggestionGenerator};
use crate::models::contact::Contact;
use crate::models::notification::{NotificationPayload, Recipient};
use crate::notify::{Acknowledgement, DispatchError, NotificationDispatcher};

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn contact(name: &str, birthday: Option<NaiveDate>, anniversary: Option<NaiveDate>) -> Contact {
    Contact {
        id: format!("rec_{}", name.to_lowercase()),
        email: format!("{}@x.com", name.to_lowercase()),
        name: name.to_string(),
        interests: Some("books".to_string()),
        birthday,
        anniversary,
    }
}

/// One outbound call, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Suggest {
        name: String,
        event: String,
        interests: String,
    },
    Dispatch {
        template: String,
        recipient: Recipient,
        payload: NotificationPayload,
    },
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub fn calls(log: &CallLog) -> Vec<Call> {
    log.lock().unwrap().clone()
}

pub struct StaticContacts(pub Vec<Contact>);

#[async_trait]
impl ContactRepository for StaticContacts {
    async fn fetch_all(&self) -> Result<Vec<Contact>, RepositoryError> {
        Ok(self.0.clone())
    }
}

pub struct UnreachableContacts;

#[async_trait]
impl ContactRepository for UnreachableContacts {
    async fn fetch_all(&self) -> Result<Vec<Contact>, RepositoryError> {
        Err(RepositoryError::Api {
            status: 503,
            message: "store unavailable".to_string(),
        })
    }
}

/// Echoes a canned suggestion; fails for the named person when `fail_for` is set.
pub struct FakeGenerator {
    pub log: CallLog,
    pub fail_for: Option<String>,
}

#[async_trait]
impl SuggestionGenerator for FakeGenerator {
    async fn suggest(
        &self,
        name: &str,
        event_label: &str,
        interests: &str,
    ) -> Result<String, GenerationError> {
        self.log.lock().unwrap().push(Call::Suggest {
            name: name.to_string(),
            event: event_label.to_string(),
            interests: interests.to_string(),
        });
        if self.fail_for.as_deref() == Some(name) {
            return Err(GenerationError::EmptyCompletion);
        }
        Ok(format!("gifts for {name}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispatchBehavior {
    Succeed,
    Fail,
    /// Never resolves.
    Stall,
}

pub struct FakeDispatcher {
    pub log: CallLog,
    pub behavior: DispatchBehavior,
}

#[async_trait]
impl NotificationDispatcher for FakeDispatcher {
    async fn dispatch(
        &self,
        template_id: &str,
        recipient: &Recipient,
        payload: &NotificationPayload,
    ) -> Result<Acknowledgement, DispatchError> {
        self.log.lock().unwrap().push(Call::Dispatch {
            template: template_id.to_string(),
            recipient: recipient.clone(),
            payload: payload.clone(),
        });
        match self.behavior {
            DispatchBehavior::Succeed => Ok(Acknowledgement {
                acknowledged: true,
                ..Default::default()
            }),
            DispatchBehavior::Fail => Err(DispatchError::Api {
                status: 500,
                message: "boom".to_string(),
            }),
            DispatchBehavior::Stall => std::future::pending().await,
        }
    }
}
