use std::sync::Arc;

use crate::models::{
    documents::entities::StoredDocument,
    files::entities::{CreateFileRequest, File},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};

use crate::errors::Result;

#[cfg(test)]
pub mod memory;
pub mod sea_orm_storage;

/// 后端存储边界：账户、文档集合与文件元数据
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账户管理方法
    // 创建账户，ID 由存储生成
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取账户
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;
    // 通过邮箱获取账户（邮箱已规范化为小写）
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 更新账户，不存在时返回 None
    async fn update_user(&self, id: &str, update: UpdateUserRequest) -> Result<Option<User>>;
    // 账户总数
    async fn count_users(&self) -> Result<u64>;

    /// 文档集合方法
    // 取出集合中的全部文档
    async fn list_documents(&self, collection: &str) -> Result<Vec<StoredDocument>>;
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>>;
    // 插入新文档，ID 由存储生成
    async fn insert_document(
        &self,
        collection: &str,
        data: serde_json::Value,
    ) -> Result<StoredDocument>;
    // 整体替换已有文档，不存在时返回 None
    async fn replace_document(
        &self,
        collection: &str,
        id: &str,
        data: serde_json::Value,
    ) -> Result<Option<StoredDocument>>;
    // 按顶层字段合并写入，文档不存在时以给定 ID 创建
    async fn merge_document(
        &self,
        collection: &str,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<StoredDocument>;
    async fn delete_document(&self, collection: &str, id: &str) -> Result<bool>;
    async fn count_documents(&self, collection: &str) -> Result<u64>;

    /// 文件管理方法
    async fn create_file(&self, file: CreateFileRequest) -> Result<File>;
    // 通过下载 token 获取文件信息
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

/// 顶层字段合并，非对象时整体替换
pub(crate) fn merge_json(target: &mut serde_json::Value, patch: serde_json::Value) {
    match (target.as_object_mut(), patch) {
        (Some(target), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                target.insert(key, value);
            }
        }
        (_, patch) => *target = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_json_overwrites_top_level_keys() {
        let mut target = json!({ "full_name": "Awa", "email": "a@b.fr", "created_at": "x" });
        merge_json(&mut target, json!({ "full_name": "Awa Diop" }));
        assert_eq!(
            target,
            json!({ "full_name": "Awa Diop", "email": "a@b.fr", "created_at": "x" })
        );
    }

    #[test]
    fn test_merge_json_replaces_non_objects() {
        let mut target = json!("legacy");
        merge_json(&mut target, json!({ "email": "a@b.fr" }));
        assert_eq!(target, json!({ "email": "a@b.fr" }));
    }
}
