//! 文件元数据存储操作

use super::SeaOrmStorage;
use crate::entity::files::{ActiveModel, Entity as Files};
use crate::errors::{CampusError, Result};
use crate::models::files::entities::{CreateFileRequest, File};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 创建文件记录
    pub async fn create_file_impl(&self, req: CreateFileRequest) -> Result<File> {
        let model = ActiveModel {
            token: Set(req.token),
            original_name: Set(req.original_name),
            stored_name: Set(req.stored_name),
            file_size: Set(req.file_size),
            file_type: Set(req.file_type),
            uploaded_at: Set(chrono::Utc::now().timestamp()),
            user_id: Set(req.user_id),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("创建文件记录失败: {e}")))?;

        Ok(result.into_file())
    }

    /// 通过 token 获取文件
    pub async fn get_file_by_token_impl(&self, token: &str) -> Result<Option<File>> {
        let result = Files::find_by_id(token.to_string())
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询文件失败: {e}")))?;

        Ok(result.map(|m| m.into_file()))
    }
}
