// file: src/gateway/github.rs
// description: GitHub REST API client for repositories, collaborators, teams and members
// reference: https://docs.github.com/en/rest

use crate::config::GithubConfig;
use crate::error::{AuditError, Result};
use crate::gateway::RepositoryGateway;
use crate::gateway::pagination::{next_page_url, with_page_size};
use crate::models::{Collaborator, Member, Repository, TeamGrant};
use crate::utils::validation::Validator;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Serialize)]
struct ArchiveRequest {
    archived: bool,
}

pub struct GithubGateway {
    client: Client,
    api_url: String,
    per_page: u32,
    max_pages: u32,
}

impl GithubGateway {
    /// Build a client with the bearer token baked into its default headers.
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token.expose()))
            .map_err(|_| AuditError::Config("API token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| AuditError::Config(format!("Invalid user agent: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, user_agent);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| AuditError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            per_page: config.per_page,
            max_pages: config.max_pages,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// GET every page of a list endpoint, following `Link: rel="next"`.
    async fn get_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let mut records = Vec::new();
        let mut next = Some(with_page_size(url, self.per_page));
        let mut pages = 0;

        while let Some(page_url) = next.take() {
            if pages == self.max_pages {
                warn!(
                    "Stopped paging {} after {} pages; results are truncated",
                    url, self.max_pages
                );
                break;
            }
            pages += 1;

            debug!("GET {}", page_url);
            let response = self
                .client
                .get(&page_url)
                .send()
                .await
                .map_err(|e| transport_error(&page_url, e))?;

            let response = check_status(response, &page_url).await?;

            next = response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(next_page_url);

            let values: Vec<Value> = response.json().await.map_err(|e| AuditError::Parse {
                target: page_url.clone(),
                message: e.to_string(),
            })?;

            records.extend(decode_records(values, &page_url));
        }

        Ok(records)
    }
}

impl RepositoryGateway for GithubGateway {
    async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>> {
        self.get_list(&format!("{}/orgs/{}/repos", self.api_url, org))
            .await
    }

    async fn list_collaborators(&self, repository: &Repository) -> Result<Vec<Collaborator>> {
        self.get_list(&repository.collaborators_url()).await
    }

    async fn list_teams(&self, repository: &Repository) -> Result<Vec<TeamGrant>> {
        self.get_list(&repository.teams_url()).await
    }

    async fn list_members(&self, org: &str) -> Result<Vec<Member>> {
        self.get_list(&format!("{}/orgs/{}/members", self.api_url, org))
            .await
    }

    async fn archive(&self, repository: &Repository) -> Result<()> {
        debug!("PATCH {} (archived=true)", repository.url);

        let response = self
            .client
            .patch(&repository.url)
            .json(&ArchiveRequest { archived: true })
            .send()
            .await
            .map_err(|e| transport_error(&repository.url, e))?;

        check_status(response, &repository.url).await?;
        Ok(())
    }
}

fn transport_error(target: &str, error: reqwest::Error) -> AuditError {
    AuditError::Transport {
        target: target.to_string(),
        message: error.to_string(),
    }
}

async fn check_status(response: reqwest::Response, target: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let rate_limit_exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|remaining| remaining.trim() == "0");

    let body = response
        .text()
        .await
        .map(|text| Validator::truncate_text(text.trim(), 200))
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(status_error(status, rate_limit_exhausted, target, body))
}

/// Map a non-success status onto the error taxonomy.
pub fn status_error(
    status: StatusCode,
    rate_limit_exhausted: bool,
    target: &str,
    body: String,
) -> AuditError {
    match status {
        StatusCode::UNAUTHORIZED => AuditError::Auth {
            target: target.to_string(),
            status: status.as_u16(),
        },
        StatusCode::TOO_MANY_REQUESTS => AuditError::RateLimited(target.to_string()),
        StatusCode::FORBIDDEN if rate_limit_exhausted => {
            AuditError::RateLimited(target.to_string())
        }
        StatusCode::FORBIDDEN => AuditError::Auth {
            target: target.to_string(),
            status: status.as_u16(),
        },
        StatusCode::NOT_FOUND => AuditError::NotFound(target.to_string()),
        _ => AuditError::Api {
            target: target.to_string(),
            status: status.as_u16(),
            body,
        },
    }
}

/// Decode each element on its own so one malformed record does not discard
/// the rest of the page.
pub fn decode_records<T: DeserializeOwned>(values: Vec<Value>, target: &str) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed record #{} from {}: {}", idx, target, e);
                None
            }
        })
        .collect()
}
