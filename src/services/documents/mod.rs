pub mod delete;
pub mod get;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;

use crate::collections::{CollectionSchema, FormMode};
use crate::errors::CampusError;
use crate::models::documents::requests::{CollectionListQuery, DeleteDocumentQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 六个实体集合共用的 HTTP 处理，集合由类型参数决定
pub struct DocumentService {
    storage: Option<Arc<dyn Storage>>,
}

impl DocumentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::shared::<dyn Storage>(request, "Storage"),
        }
    }

    // 列表，支持检索
    pub async fn list_documents<S: CollectionSchema>(
        &self,
        request: &HttpRequest,
        query: CollectionListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_documents::<S>(self, request, query).await
    }

    // 详情
    pub async fn get_document<S: CollectionSchema>(
        &self,
        request: &HttpRequest,
        id: String,
    ) -> ActixResult<HttpResponse> {
        get::get_document::<S>(self, request, id).await
    }

    // 新建
    pub async fn create_document<S: CollectionSchema>(
        &self,
        request: &HttpRequest,
        fields: S,
    ) -> ActixResult<HttpResponse> {
        submit::submit_document::<S>(self, request, FormMode::Create, fields).await
    }

    // 编辑
    pub async fn update_document<S: CollectionSchema>(
        &self,
        request: &HttpRequest,
        id: String,
        fields: S,
    ) -> ActixResult<HttpResponse> {
        submit::submit_document::<S>(self, request, FormMode::from_id(Some(&id)), fields).await
    }

    // 删除，需要确认
    pub async fn delete_document<S: CollectionSchema>(
        &self,
        request: &HttpRequest,
        id: String,
        query: DeleteDocumentQuery,
    ) -> ActixResult<HttpResponse> {
        delete::delete_document::<S>(self, request, id, query).await
    }
}

/// 集合操作失败时的响应
///
/// 未找到与校验失败带回具体提示，其余错误只给出集合级别的提示。
pub(crate) fn document_failure(
    err: &CampusError,
    code: ErrorCode,
    message: &'static str,
) -> HttpResponse {
    match err {
        CampusError::NotFound(msg) => HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::DocumentNotFound, msg.as_str())),
        CampusError::Validation(msg) => HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::DocumentValidationFailed,
            msg.as_str(),
        )),
        _ => {
            tracing::error!("{}: {}", message, err);
            HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
                .json(ApiResponse::error_empty(code, message))
        }
    }
}
