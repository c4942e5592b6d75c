use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DocumentService, document_failure};
use crate::collections::{CollectionSchema, CollectionService};
use crate::models::documents::requests::CollectionListQuery;
use crate::models::documents::responses::DocumentListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_documents<S: CollectionSchema>(
    service: &DocumentService,
    request: &HttpRequest,
    query: CollectionListQuery,
) -> ActixResult<HttpResponse> {
    let collection = CollectionService::<S>::new(service.get_storage(request)?);

    match collection.list(query.search.as_deref()).await {
        Ok(items) => {
            let total = items.len();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                DocumentListResponse { items, total },
                "Liste récupérée",
            )))
        }
        Err(e) => Ok(document_failure(
            &e,
            ErrorCode::DocumentLoadFailed,
            S::messages().list_failed,
        )),
    }
}
