use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Project;

/// `{success, count, projetos}` returned by the list and search endpoints
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ProjectList {
    pub success: bool,
    #[serde(default)]
    pub count: usize,
    #[serde(rename = "projetos", default)]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProjectList {
    pub fn ok(projects: Vec<Project>) -> Self {
        Self {
            success: true,
            count: projects.len(),
            projects,
            error: None,
        }
    }
}

/// `{success, projeto}` returned by the single-record endpoints
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ProjectEnvelope {
    pub success: bool,
    #[serde(rename = "projeto", default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProjectEnvelope {
    pub fn ok(project: Project) -> Self {
        Self {
            success: true,
            project: Some(project),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            project: None,
            error: Some(error.into()),
        }
    }
}

/// Health report; the client also uses it for its offline fallback
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StatusReport {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(rename = "projetos_total", default, skip_serializing_if = "Option::is_none")]
    pub total_projects: Option<i64>,
    #[serde(rename = "estatisticas", default)]
    pub stats: BTreeMap<String, i64>,
    #[serde(rename = "mensagem", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusReport {
    pub const ONLINE: &'static str = "online";
    pub const OFFLINE: &'static str = "offline";

    pub fn offline(error: impl Into<String>) -> Self {
        Self {
            status: Self::OFFLINE.to_string(),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn is_online(&self) -> bool {
        self.status == Self::ONLINE
    }
}
