//! 通用实体集合
//!
//! 六类实体共用同一套列表 / 详情 / 表单 / 删除流程，差异由 [`CollectionSchema`] 描述。

pub mod delete;
pub mod filter;
pub mod form;
pub mod schemas;
pub mod service;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use delete::PendingDelete;
pub use filter::{filter_documents, matches_query};
pub use form::FormMode;
pub use service::CollectionService;

use crate::errors::Result;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 面向用户的集合提示语
#[derive(Debug, Clone, Copy)]
pub struct SchemaMessages {
    pub not_found: &'static str,
    pub list_failed: &'static str,
    pub load_failed: &'static str,
    pub save_failed: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
    pub delete_prompt: &'static str,
}

/// 写入钩子可以访问的上下文
pub struct WriteContext<'a> {
    pub storage: &'a dyn Storage,
    /// 发起写入的用户
    pub actor: Option<&'a User>,
    pub mode: &'a FormMode,
}

#[async_trait]
pub trait CollectionSchema:
    Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    /// 文档集合名，同时作为路由路径
    const COLLECTION: &'static str;

    fn messages() -> &'static SchemaMessages;

    /// 参与列表检索的字段值
    fn search_values(&self) -> Vec<&str>;

    /// 删除确认时展示的名称
    fn display_title(&self) -> String;

    /// 表单校验，返回第一条不满足的规则
    fn validate(&self, mode: &FormMode) -> std::result::Result<(), &'static str>;

    /// 写入前补全派生字段
    async fn before_write(&mut self, _ctx: &WriteContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// 去掉首尾空白后为空即视为缺失
pub(crate) fn require(value: &str, message: &'static str) -> std::result::Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err(message);
    }
    Ok(())
}
