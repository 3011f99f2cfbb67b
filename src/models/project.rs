use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Status value carried by every listable record
pub const ACTIVE_STATUS: &str = "ativo";

/// Category value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "all";

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub category: String,
    #[serde(rename = "nivel_acesso")]
    pub access_level: String,
    pub status: String,
    #[serde(rename = "data_criacao")]
    pub created_at: NaiveDateTime,
}

/// Fields accepted by the insert endpoint; id, status and timestamp come from the store
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewProject {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "tipo")]
    pub category: String,
    #[serde(rename = "nivel_acesso")]
    pub access_level: String,
}

impl NewProject {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        access_level: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
            access_level: access_level.into(),
        }
    }
}
