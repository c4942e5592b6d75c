use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use super::collections::{delete_document, get_document};
use crate::middlewares::{self, RequireRole};
use crate::models::documents::requests::CollectionListQuery;
use crate::models::users::entities::{UserProfileRecord, UserRole};
use crate::models::users::requests::NewUserRequest;
use crate::services::UserService;

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

pub async fn list_users(
    request: HttpRequest,
    query: web::Query<CollectionListQuery>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .list_users(&request, query.into_inner())
        .await
}

pub async fn create_user(
    request: HttpRequest,
    form: web::Json<NewUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(&request, form.into_inner()).await
}

// 配置路由
pub fn configure_users_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(middlewares::RequireJWT)
            // 建号与删除仅限管理员
            .service(
                web::resource("")
                    .guard(guard::Post())
                    .wrap(RequireRole::new(UserRole::Admin))
                    .route(web::post().to(create_user)),
            )
            .service(
                web::resource("/{id}")
                    .guard(guard::Delete())
                    .wrap(RequireRole::new(UserRole::Admin))
                    .route(web::delete().to(delete_document::<UserProfileRecord>)),
            )
            .route("", web::get().to(list_users))
            .route("/{id}", web::get().to(get_document::<UserProfileRecord>)),
    );
}
