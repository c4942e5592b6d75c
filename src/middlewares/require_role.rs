/*!
 * 基于角色的访问控制中间件
 *
 * 必须放在 RequireJWT 之后，由 RequireJWT 先把当前用户放进请求扩展。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{guard, web};
 * use crate::middlewares::{RequireJWT, RequireRole};
 * use crate::models::users::entities::UserRole;
 *
 * web::scope("/api/v1/users")
 *     .wrap(RequireJWT)
 *     .service(
 *         web::resource("")
 *             .guard(guard::Post())
 *             .wrap(RequireRole::new(UserRole::Admin))
 *             .route(web::post().to(create_user)),
 *     )
 * ```
 *
 * 任一角色即可时使用 `RequireRole::new_any(&[UserRole::Admin, UserRole::Professor])`。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use super::RequireJWT;
use super::require_jwt::create_error_response;
use crate::models::ErrorCode;
use crate::models::users::entities::UserRole;

#[derive(Clone)]
pub struct RequireRole {
    allowed_roles: Vec<UserRole>,
}

impl RequireRole {
    pub fn new(role: UserRole) -> Self {
        Self {
            allowed_roles: vec![role],
        }
    }

    /// 拥有其中任一角色即可
    pub fn new_any(roles: &[UserRole]) -> Self {
        Self {
            allowed_roles: roles.to_vec(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed_roles: self.allowed_roles.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed_roles: Vec<UserRole>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let allowed_roles = self.allowed_roles.clone();

        Box::pin(async move {
            match RequireJWT::extract_user_claims(req.request()) {
                Some(user) if allowed_roles.contains(&user.role) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(user) => {
                    info!(
                        "Access denied for user {} (role: {}). Allowed roles: {:?}",
                        user.id, user.role, allowed_roles
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Vous n'avez pas les droits nécessaires pour effectuer cette opération.",
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!("Role check failed: no user in request, is RequireJWT applied first?");
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Vous devez être connecté pour effectuer cette opération.",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ObjectCache;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::models::users::entities::SignInProvider;
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::Storage;
    use crate::storage::memory::MemoryStorage;
    use crate::utils::jwt::JwtUtils;
    use actix_web::{App, HttpResponse, test, web};
    use std::sync::Arc;

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_only_allowed_roles_pass() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
        let mut tokens = Vec::new();
        for (email, role) in [
            ("admin@univ.fr", UserRole::Admin),
            ("prof@univ.fr", UserRole::Professor),
            ("awa@univ.fr", UserRole::Student),
        ] {
            let user = storage
                .create_user(CreateUserRequest {
                    email: email.into(),
                    password_hash: String::new(),
                    display_name: None,
                    photo_url: None,
                    role,
                    provider: SignInProvider::Password,
                })
                .await
                .unwrap();
            tokens.push(JwtUtils::generate_access_token(&user.id, &role.to_string()).unwrap());
        }

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .service(
                    web::scope("/staff")
                        .wrap(RequireRole::new_any(&[UserRole::Admin, UserRole::Professor]))
                        .wrap(RequireJWT)
                        .route("", web::get().to(ok)),
                ),
        )
        .await;

        let expected = [StatusCode::OK, StatusCode::OK, StatusCode::FORBIDDEN];
        for (token, status) in tokens.iter().zip(expected) {
            let req = test::TestRequest::get()
                .uri("/staff")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), status);
        }

        let resp = test::call_service(&app, test::TestRequest::get().uri("/staff").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
