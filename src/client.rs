//! HTTP client for the character API.
//!
//! Every request carries the configured timeout. Failures of any kind (connection refused,
//! timeout, non-success status, malformed body) are logged and answered with an empty list, so
//! the game never stops on a network error: it simply finds no match.

use std::future::Future;

use anyhow::{bail, Context};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::{configuration::Configuration, entity::Entity, search::CharacterSource};

/// Talks to a running `guess-server`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for [`Configuration::api_url`] with the configured request timeout.
    ///
    /// Fails if the API URL is blank.
    pub fn new(config: &Configuration) -> anyhow::Result<Self> {
        let base_url = config.api_url().trim().trim_end_matches('/');
        if base_url.is_empty() {
            bail!("API_URL is empty");
        }
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("cannot build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.to_owned(),
        })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of `route` with the given query parameters.
    fn url(&self, route: &str, params: &[(&str, &str)]) -> anyhow::Result<Url> {
        let raw = format!("{}/{}", self.base_url, route.trim_start_matches('/'));
        Url::parse_with_params(&raw, params).with_context(|| format!("invalid API URL '{raw}'"))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> anyhow::Result<T> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("malformed answer from {url}"))
    }

    /// Fetches a character list, keeping only valid ones.
    #[instrument(skip(self))]
    async fn fetch_characters(&self, route: &str, params: &[(&str, &str)]) -> Vec<Entity> {
        let result = match self.url(route, params) {
            Ok(url) => self.get_json::<Vec<Entity>>(url).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(characters) => {
                let valid: Vec<_> = characters.into_iter().filter(Entity::is_valid).collect();
                debug!(count = valid.len(), "characters received");
                valid
            }
            Err(e) => {
                warn!("{e:#}");
                vec![]
            }
        }
    }

    /// One server-side random character, `None` on any failure.
    pub async fn random_character(&self) -> Option<Entity> {
        let url = self.url("random-character", &[]).ok()?;
        match self.get_json::<Entity>(url).await {
            Ok(character) if character.is_valid() => Some(character),
            Ok(_) => None,
            Err(e) => {
                warn!("{e:#}");
                None
            }
        }
    }
}

impl CharacterSource for ApiClient {
    fn search(&self, query: &str) -> impl Future<Output = Vec<Entity>> + Send {
        async move { self.fetch_characters("search", &[("query", query)]).await }
    }

    fn all_characters(&self) -> impl Future<Output = Vec<Entity>> + Send {
        async move { self.fetch_characters("all-characters", &[]).await }
    }
}
