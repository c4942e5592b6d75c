//! 文档实体
//!
//! 所有实体集合共用一张表，`data` 列保存 JSON 文本，主键为 `(id, collection)`。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub collection: String,
    #[sea_orm(column_type = "Text")]
    pub data: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_stored_document(
        self,
    ) -> crate::errors::Result<crate::models::documents::entities::StoredDocument> {
        use crate::models::documents::entities::StoredDocument;
        use chrono::{DateTime, Utc};

        Ok(StoredDocument {
            id: self.id,
            collection: self.collection,
            data: serde_json::from_str(&self.data)?,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        })
    }
}
