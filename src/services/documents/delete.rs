use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DocumentService, document_failure};
use crate::collections::{CollectionSchema, CollectionService};
use crate::models::documents::requests::DeleteDocumentQuery;
use crate::models::documents::responses::DeleteConfirmationResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 未带 `confirm=true` 时只返回确认提示，不做任何写入
pub async fn delete_document<S: CollectionSchema>(
    service: &DocumentService,
    request: &HttpRequest,
    id: String,
    query: DeleteDocumentQuery,
) -> ActixResult<HttpResponse> {
    let collection = CollectionService::<S>::new(service.get_storage(request)?);
    let messages = S::messages();

    let pending = match collection.request_delete(&id).await {
        Ok(pending) => pending,
        Err(e) => {
            return Ok(document_failure(
                &e,
                ErrorCode::DocumentDeleteFailed,
                messages.delete_failed,
            ));
        }
    };

    if !query.confirm {
        let confirmation = DeleteConfirmationResponse {
            id: pending.id().to_string(),
            title: pending.title().to_string(),
            prompt: pending.prompt().to_string(),
        };
        pending.cancel();
        return Ok(HttpResponse::Conflict().json(ApiResponse::error(
            ErrorCode::DeleteConfirmationRequired,
            confirmation,
            messages.delete_prompt,
        )));
    }

    match pending.confirm().await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(messages.deleted))),
        Err(e) => Ok(document_failure(
            &e,
            ErrorCode::DocumentDeleteFailed,
            messages.delete_failed,
        )),
    }
}
