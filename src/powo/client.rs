//! HTTP access to the POWO name-search endpoint.
use crate::error::{CrateError, LookupFailure, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

const POWO_SEARCH_URL: &str = "https://powo.science.kew.org/api/1/search";
pub const USER_AGENT: &str = "powo-names/0.1 (scientific name checker) reqwest/0.12";

/// Restricts search hits to accepted names.
pub const ACCEPTED_NAMES_FILTER: &str = "accepted_names";
pub const RESULTS_PER_PAGE: u32 = 50;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Raw reply of one search call. Status and body are interpreted by the resolver.
#[derive(Debug, Clone)]
pub struct SearchReply {
    pub status: StatusCode,
    pub body: String,
}

/// A remote service that can be searched for scientific names.
///
/// An `Err` is always `LookupFailure::Transport`: the request never produced a
/// reply (connection refused, timeout, unreadable body).
#[async_trait]
pub trait NameSearch: Send + Sync {
    async fn search(&self, query: &str) -> std::result::Result<SearchReply, LookupFailure>;
}

pub struct PowoClient {
    http: Client,
    base_url: String,
}

impl PowoClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(POWO_SEARCH_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(CrateError::ApiRequestError)?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl NameSearch for PowoClient {
    async fn search(&self, query: &str) -> std::result::Result<SearchReply, LookupFailure> {
        let per_page = RESULTS_PER_PAGE.to_string();
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("f", ACCEPTED_NAMES_FILTER),
                ("perPage", per_page.as_str()),
            ])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| LookupFailure::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LookupFailure::Transport(e.to_string()))?;
        Ok(SearchReply { status, body })
    }
}
