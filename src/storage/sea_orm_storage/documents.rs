//! 文档集合存储操作

use super::SeaOrmStorage;
use crate::entity::documents::{ActiveModel, Column, Entity as Documents};
use crate::errors::{CampusError, Result};
use crate::models::documents::entities::StoredDocument;
use crate::storage::merge_json;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 取出集合中的全部文档，按创建时间排序
    pub async fn list_documents_impl(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        let models = Documents::find()
            .filter(Column::Collection.eq(collection))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                CampusError::database_operation(format!("查询集合 {collection} 失败: {e}"))
            })?;

        models
            .into_iter()
            .map(|m| m.into_stored_document())
            .collect()
    }

    pub async fn get_document_impl(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>> {
        let model = Documents::find_by_id((id.to_string(), collection.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询文档失败: {e}")))?;

        model.map(|m| m.into_stored_document()).transpose()
    }

    pub async fn insert_document_impl(
        &self,
        collection: &str,
        data: serde_json::Value,
    ) -> Result<StoredDocument> {
        self.insert_with_id(collection, &uuid::Uuid::new_v4().to_string(), data)
            .await
    }

    async fn insert_with_id(
        &self,
        collection: &str,
        id: &str,
        data: serde_json::Value,
    ) -> Result<StoredDocument> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(id.to_string()),
            collection: Set(collection.to_string()),
            data: Set(serde_json::to_string(&data)?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("创建文档失败: {e}")))?;

        result.into_stored_document()
    }

    pub async fn replace_document_impl(
        &self,
        collection: &str,
        id: &str,
        data: serde_json::Value,
    ) -> Result<Option<StoredDocument>> {
        if self.get_document_impl(collection, id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id.to_string()),
            collection: Set(collection.to_string()),
            data: Set(serde_json::to_string(&data)?),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("更新文档失败: {e}")))?;

        result.into_stored_document().map(Some)
    }

    pub async fn merge_document_impl(
        &self,
        collection: &str,
        id: &str,
        patch: serde_json::Value,
    ) -> Result<StoredDocument> {
        match self.get_document_impl(collection, id).await? {
            Some(existing) => {
                let mut data = existing.data;
                merge_json(&mut data, patch);
                self.replace_document_impl(collection, id, data)
                    .await?
                    .ok_or_else(|| CampusError::not_found(format!("文档 {collection}/{id} 不存在")))
            }
            None => self.insert_with_id(collection, id, patch).await,
        }
    }

    pub async fn delete_document_impl(&self, collection: &str, id: &str) -> Result<bool> {
        let result = Documents::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::Collection.eq(collection))
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("删除文档失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_documents_impl(&self, collection: &str) -> Result<u64> {
        Documents::find()
            .filter(Column::Collection.eq(collection))
            .count(&self.db)
            .await
            .map_err(|e| {
                CampusError::database_operation(format!("统计集合 {collection} 失败: {e}"))
            })
    }
}
