use serde::Serialize;
use ts_rs::TS;

use super::entities::{UserProfileRecord, UserRole};
use crate::collections::CollectionSchema;
use crate::models::documents::entities::Document;

// 用户列表中的一行
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/user.ts")]
pub struct UserDirectoryEntry {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
    pub role_label: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Document<UserProfileRecord>> for UserDirectoryEntry {
    fn from(document: Document<UserProfileRecord>) -> Self {
        Self {
            display_name: document.fields.display_title(),
            role_label: document.fields.role.label().to_string(),
            id: document.id,
            email: document.fields.email,
            role: document.fields.role,
            created_at: document.fields.created_at,
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/user.ts")]
pub struct UserListResponse {
    pub items: Vec<UserDirectoryEntry>,
    pub total: usize,
}
