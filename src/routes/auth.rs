use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::auth::requests::{
    LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest, ProviderLoginRequest,
    RegisterRequest, UpdateEmailRequest, UpdatePasswordRequest, UpdateProfileRequest,
};
use crate::services::AuthService;
use crate::utils::SafeProviderName;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn register(
    req: HttpRequest,
    register_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(register_data.into_inner(), &req).await
}

pub async fn login(
    req: HttpRequest,
    login_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(login_data.into_inner(), &req).await
}

pub async fn login_with_provider(
    req: HttpRequest,
    provider: SafeProviderName,
    login_data: web::Json<ProviderLoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .login_with_provider(&provider.0, login_data.into_inner(), &req)
        .await
}

pub async fn reset_password(
    req: HttpRequest,
    reset_data: web::Json<PasswordResetRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.reset_password(reset_data.into_inner(), &req).await
}

pub async fn confirm_password_reset(
    req: HttpRequest,
    confirm_data: web::Json<PasswordResetConfirmRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .confirm_password_reset(confirm_data.into_inner(), &req)
        .await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn get_user(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_user(&request).await
}

pub async fn update_profile(
    req: HttpRequest,
    update_data: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.update_profile(update_data.into_inner(), &req).await
}

pub async fn update_email(
    req: HttpRequest,
    update_data: web::Json<UpdateEmailRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.update_email(update_data.into_inner(), &req).await
}

pub async fn update_password(
    req: HttpRequest,
    update_data: web::Json<UpdatePasswordRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .update_password(update_data.into_inner(), &req)
        .await
}

pub async fn logout(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&request).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(
                web::resource("/register")
                    .wrap(RateLimit::register())
                    .route(web::post().to(register)),
            )
            .service(
                web::resource("/login")
                    .wrap(RateLimit::login())
                    .route(web::post().to(login)),
            )
            .service(
                web::resource("/login/{provider}")
                    .wrap(RateLimit::login())
                    .route(web::post().to(login_with_provider)),
            )
            .service(
                web::resource("/password-reset")
                    .wrap(RateLimit::password_reset())
                    .route(web::post().to(reset_password)),
            )
            .service(
                web::resource("/password-reset/confirm")
                    .wrap(RateLimit::password_reset())
                    .route(web::post().to(confirm_password_reset)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(RateLimit::refresh_token())
                    .route(web::post().to(refresh_token)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/me", web::get().to(get_user))
                    .route("/profile", web::put().to(update_profile))
                    .route("/email", web::put().to(update_email))
                    .route("/password", web::put().to(update_password))
                    .route("/logout", web::post().to(logout)),
            ),
    );
}
