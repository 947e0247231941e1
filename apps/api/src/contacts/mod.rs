//! Contacts repository — reads the external `contacts` table.
//!
//! Always fetches the whole collection; no filtering or caching happens here.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::contact::Contact;

const CONTACTS_TABLE: &str = "contacts";
const PAGE_SIZE: u32 = 200;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed contact record: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Contact>, RepositoryError>;
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    page: PageRequest<'a>,
}

#[derive(Debug, Serialize)]
struct PageRequest<'a> {
    size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    records: Vec<serde_json::Value>,
    #[serde(default)]
    meta: Option<QueryMeta>,
}

#[derive(Debug, Deserialize)]
struct QueryMeta {
    page: PageMeta,
}

#[derive(Debug, Deserialize)]
struct PageMeta {
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default)]
    more: bool,
}

#[derive(Debug, Deserialize)]
struct XataError {
    message: String,
}

/// Client for a Xata database branch, speaking its REST query API.
#[derive(Clone)]
pub struct XataClient {
    client: Client,
    api_key: String,
    query_url: String,
}

impl XataClient {
    /// `database_url` is the branch-less database URL, e.g.
    /// `https://ws.us-east-1.xata.sh/db/wisher`.
    pub fn new(database_url: &str, branch: &str, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            query_url: format!(
                "{}:{}/tables/{}/query",
                database_url.trim_end_matches('/'),
                branch,
                CONTACTS_TABLE
            ),
        }
    }

    async fn query_page(&self, after: Option<&str>) -> Result<QueryResponse, RepositoryError> {
        let response = self
            .client
            .post(&self.query_url)
            .bearer_auth(&self.api_key)
            .json(&QueryRequest {
                page: PageRequest {
                    size: PAGE_SIZE,
                    after,
                },
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<XataError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(RepositoryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ContactRepository for XataClient {
    async fn fetch_all(&self) -> Result<Vec<Contact>, RepositoryError> {
        let mut contacts = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.query_page(cursor.as_deref()).await?;
            for record in page.records {
                contacts.push(serde_json::from_value::<Contact>(record)?);
            }

            match page.meta.map(|m| m.page) {
                Some(PageMeta {
                    cursor: Some(next),
                    more: true,
                }) => cursor = Some(next),
                _ => break,
            }
        }

        debug!("Fetched {} contact records", contacts.len());
        Ok(contacts)
    }
}
