//! HTTP client for the catalog API.
//!
//! Every public call degrades instead of failing: list and search fall back to an
//! empty vector, the status check to an `offline` report (also for any non-2xx
//! reply) and saving to a `success: false` envelope. The underlying error is logged.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::error;

use crate::error::ClientError;
use crate::models::{NewProject, Project, ProjectEnvelope, ProjectList, StatusReport, ALL_CATEGORIES};

#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    /// `base_url` points at the API root, e.g. `http://localhost:5000/api`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Active projects of `category`, or of every category for `todos`/`all`
    pub async fn load_projects(&self, category: &str) -> Vec<Project> {
        let url = format!("{}/projetos", self.base_url);
        let request = if is_all_tab(category) {
            self.http.get(url)
        } else {
            self.http.get(url).query(&[("tipo", category)])
        };

        match self.fetch_list(request).await {
            Ok(projects) => projects,
            Err(err) => {
                error!(error = %err, category, "failed to load projects");
                Vec::new()
            }
        }
    }

    pub async fn search_projects(&self, term: &str) -> Vec<Project> {
        let request = self
            .http
            .get(format!("{}/projetos/buscar", self.base_url))
            .query(&[("termo", term)]);

        match self.fetch_list(request).await {
            Ok(projects) => projects,
            Err(err) => {
                error!(error = %err, term, "project search failed");
                Vec::new()
            }
        }
    }

    /// The server's report; `offline` when unreachable or answering with an error status
    pub async fn check_status(&self) -> StatusReport {
        match self.fetch_status().await {
            Ok(report) => report,
            Err(err) => {
                error!(error = %err, "status check failed");
                StatusReport::offline(err.to_string())
            }
        }
    }

    pub async fn save_project(&self, project: &NewProject) -> ProjectEnvelope {
        let request = self
            .http
            .post(format!("{}/projetos", self.base_url))
            .json(project);

        match send_json::<ProjectEnvelope>(request).await {
            Ok(envelope) => envelope,
            Err(err) => {
                error!(error = %err, "failed to save project");
                ProjectEnvelope::failed(err.to_string())
            }
        }
    }

    async fn fetch_status(&self) -> Result<StatusReport, ClientError> {
        let response = self
            .http
            .get(format!("{}/status", self.base_url))
            .send()
            .await?;
        let code = response.status();
        if !code.is_success() {
            let reason = response
                .json::<StatusReport>()
                .await
                .ok()
                .and_then(|report| report.error)
                .unwrap_or_else(|| code.to_string());
            return Err(ClientError::Api(format!("HTTP {}: {}", code.as_u16(), reason)));
        }

        Ok(response.json::<StatusReport>().await?)
    }

    async fn fetch_list(&self, request: reqwest::RequestBuilder) -> Result<Vec<Project>, ClientError> {
        let envelope = send_json::<ProjectList>(request).await?;
        if envelope.success {
            Ok(envelope.projects)
        } else {
            Err(ClientError::Api(
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

/// The catalog tab `todos` (or no tab at all) means "no category filter".
/// The API itself only treats `all` that way, so the parameter is left off.
fn is_all_tab(category: &str) -> bool {
    category.is_empty() || category == "todos" || category == ALL_CATEGORIES
}

async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    Ok(response.json::<T>().await?)
}
