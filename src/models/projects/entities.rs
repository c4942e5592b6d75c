use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_PROJECT_STATUS: &str = "En attente";
pub const DEFAULT_PROJECT_CATEGORY: &str = "Recherche";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "../mobile/src/types/generated/project.ts")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub status: String,
    pub deadline: DateTime<Utc>,
    pub supervisor: String,
    /// 参与者姓名
    pub participants: Vec<String>,
    pub category: String,
    pub objectives: String,
    pub resources: String,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: DEFAULT_PROJECT_STATUS.to_string(),
            deadline: Utc::now(),
            supervisor: String::new(),
            participants: Vec::new(),
            category: DEFAULT_PROJECT_CATEGORY.to_string(),
            objectives: String::new(),
            resources: String::new(),
        }
    }
}
