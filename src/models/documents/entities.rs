use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{CampusError, Result};

/// 存储层返回的原始文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub collection: String,
    pub data: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 带类型的文档：ID 与时间戳之外的字段平铺在同一层
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    pub id: String,
    #[serde(flatten)]
    pub fields: T,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl<T: DeserializeOwned> Document<T> {
    pub fn from_stored(stored: StoredDocument) -> Result<Self> {
        let fields = serde_json::from_value(stored.data).map_err(|e| {
            CampusError::serialization(format!(
                "Document {}/{} does not match its schema: {e}",
                stored.collection, stored.id
            ))
        })?;

        Ok(Document {
            id: stored.id,
            fields,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }
}
