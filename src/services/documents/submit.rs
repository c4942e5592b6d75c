use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DocumentService, document_failure};
use crate::collections::{CollectionSchema, CollectionService, FormMode};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

/// 新建与编辑共用，由 [`FormMode`] 区分
pub async fn submit_document<S: CollectionSchema>(
    service: &DocumentService,
    request: &HttpRequest,
    mode: FormMode,
    fields: S,
) -> ActixResult<HttpResponse> {
    let collection = CollectionService::<S>::new(service.get_storage(request)?);
    let actor = RequireJWT::extract_user_claims(request);
    let messages = S::messages();

    let is_edit = mode.is_edit();
    match collection.submit(mode, fields, actor.as_ref()).await {
        Ok(document) if is_edit => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(document, messages.updated)))
        }
        Ok(document) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(document, messages.created)))
        }
        Err(e) => Ok(document_failure(
            &e,
            ErrorCode::DocumentSaveFailed,
            messages.save_failed,
        )),
    }
}
