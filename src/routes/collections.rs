use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::collections::CollectionSchema;
use crate::middlewares;
use crate::models::courses::entities::Course;
use crate::models::documents::requests::{CollectionListQuery, DeleteDocumentQuery};
use crate::models::events::entities::Event;
use crate::models::projects::entities::Project;
use crate::models::resources::entities::Resource;
use crate::models::students::entities::Student;
use crate::models::teachers::entities::Teacher;
use crate::services::DocumentService;
use crate::utils::SafeDocumentId;

// 懒加载的全局 DocumentService 实例，六个集合共用
static DOCUMENT_SERVICE: Lazy<DocumentService> = Lazy::new(DocumentService::new_lazy);

pub async fn list_documents<S: CollectionSchema>(
    request: HttpRequest,
    query: web::Query<CollectionListQuery>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .list_documents::<S>(&request, query.into_inner())
        .await
}

pub async fn get_document<S: CollectionSchema>(
    request: HttpRequest,
    id: SafeDocumentId,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.get_document::<S>(&request, id.0).await
}

pub async fn create_document<S: CollectionSchema>(
    request: HttpRequest,
    fields: web::Json<S>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .create_document::<S>(&request, fields.into_inner())
        .await
}

pub async fn update_document<S: CollectionSchema>(
    request: HttpRequest,
    id: SafeDocumentId,
    fields: web::Json<S>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .update_document::<S>(&request, id.0, fields.into_inner())
        .await
}

pub async fn delete_document<S: CollectionSchema>(
    request: HttpRequest,
    id: SafeDocumentId,
    query: web::Query<DeleteDocumentQuery>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .delete_document::<S>(&request, id.0, query.into_inner())
        .await
}

/// 单个集合的路由，路径取集合名
pub fn configure_collection_routes<S: CollectionSchema>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(&format!("/api/v1/{}", S::COLLECTION))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_documents::<S>))
            .route("", web::post().to(create_document::<S>))
            .route("/{id}", web::get().to(get_document::<S>))
            .route("/{id}", web::put().to(update_document::<S>))
            .route("/{id}", web::delete().to(delete_document::<S>)),
    );
}

// 配置路由
pub fn configure_collections_routes(cfg: &mut web::ServiceConfig) {
    configure_collection_routes::<Student>(cfg);
    configure_collection_routes::<Teacher>(cfg);
    configure_collection_routes::<Course>(cfg);
    configure_collection_routes::<Resource>(cfg);
    configure_collection_routes::<Event>(cfg);
    configure_collection_routes::<Project>(cfg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ObjectCache;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::models::users::entities::{SignInProvider, UserRole};
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::Storage;
    use crate::storage::memory::MemoryStorage;
    use crate::utils::jwt::JwtUtils;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    async fn signed_in() -> (Arc<MemoryStorage>, Arc<dyn ObjectCache>, String) {
        let storage = Arc::new(MemoryStorage::new());
        let user = storage
            .create_user(CreateUserRequest {
                email: "admin@campus.fr".into(),
                password_hash: String::new(),
                display_name: Some("Admin".into()),
                photo_url: None,
                role: UserRole::Admin,
                provider: SignInProvider::Password,
            })
            .await
            .unwrap();
        let token = JwtUtils::generate_access_token(&user.id, "admin").unwrap();
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
        (storage, cache, token)
    }

    macro_rules! campus_app {
        ($storage:expr, $cache:expr) => {{
            let storage: Arc<dyn Storage> = $storage.clone();
            test::init_service(
                App::new()
                    .app_data(web::Data::new(storage))
                    .app_data(web::Data::new($cache.clone()))
                    .configure(configure_collections_routes),
            )
            .await
        }};
    }

    fn algebra() -> Value {
        json!({
            "title": "Algèbre linéaire",
            "code": "MATH201",
            "credits": 6,
            "instructor": "Moussa Ndiaye"
        })
    }

    #[actix_web::test]
    async fn test_create_list_and_search_courses() {
        let (storage, cache, token) = signed_in().await;
        let app = campus_app!(storage, cache);
        let auth = ("Authorization", format!("Bearer {token}"));

        let req = test::TestRequest::post()
            .uri("/api/v1/courses")
            .insert_header(auth.clone())
            .set_json(algebra())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Cours créé avec succès");
        assert_eq!(body["data"]["code"], "MATH201");

        let req = test::TestRequest::get()
            .uri("/api/v1/courses?search=math")
            .insert_header(auth.clone())
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["total"], 1);

        let req = test::TestRequest::get()
            .uri("/api/v1/courses?search=chimie")
            .insert_header(auth)
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["total"], 0);
    }

    #[actix_web::test]
    async fn test_invalid_form_is_rejected_with_message() {
        let (storage, cache, token) = signed_in().await;
        let app = campus_app!(storage, cache);

        let req = test::TestRequest::post()
            .uri("/api/v1/courses")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({ "title": "Algèbre", "code": "MATH201", "credits": 0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Le nombre de crédits doit être supérieur à 0");
        assert_eq!(storage.document_writes(), 0);
    }

    #[actix_web::test]
    async fn test_delete_requires_confirmation() {
        let (storage, cache, token) = signed_in().await;
        let app = campus_app!(storage, cache);
        let auth = ("Authorization", format!("Bearer {token}"));

        let req = test::TestRequest::post()
            .uri("/api/v1/courses")
            .insert_header(auth.clone())
            .set_json(algebra())
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/courses/{id}"))
            .insert_header(auth.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["title"], "Algèbre linéaire");
        assert_eq!(
            body["data"]["prompt"],
            "Êtes-vous sûr de vouloir supprimer ce cours ?"
        );
        assert_eq!(storage.document_deletes(), 0);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/courses/{id}?confirm=true"))
            .insert_header(auth.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(storage.document_deletes(), 1);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/courses/{id}"))
            .insert_header(auth)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Cours non trouvé");
    }

    #[actix_web::test]
    async fn test_collections_require_authentication() {
        let (storage, cache, _) = signed_in().await;
        let app = campus_app!(storage, cache);

        let req = test::TestRequest::get().uri("/api/v1/students").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
