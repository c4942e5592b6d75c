use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DocumentService, document_failure};
use crate::collections::{CollectionSchema, CollectionService};
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_document<S: CollectionSchema>(
    service: &DocumentService,
    request: &HttpRequest,
    id: String,
) -> ActixResult<HttpResponse> {
    let collection = CollectionService::<S>::new(service.get_storage(request)?);

    match collection.get(&id).await {
        Ok(document) => Ok(HttpResponse::Ok().json(ApiResponse::success(document, ""))),
        Err(e) => Ok(document_failure(
            &e,
            ErrorCode::DocumentLoadFailed,
            S::messages().load_failed,
        )),
    }
}
