pub mod login;
pub mod logout;
pub mod password;
pub mod profile;
pub mod register;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::errors::CampusError;
use crate::identity::IdentityProvider;
use crate::middlewares::RequireJWT;
use crate::models::auth::requests::{
    LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest, ProviderLoginRequest,
    RegisterRequest, UpdateEmailRequest, UpdatePasswordRequest, UpdateProfileRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::session::SessionFacade;
use crate::session::messages::SessionOp;

pub struct AuthService {
    identity: Option<Arc<dyn IdentityProvider>>,
    cache: Option<Arc<dyn ObjectCache>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self {
            identity: None,
            cache: None,
        }
    }

    pub(crate) fn get_identity(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<Arc<dyn IdentityProvider>> {
        match &self.identity {
            Some(identity) => Ok(identity.clone()),
            None => super::shared::<dyn IdentityProvider>(request, "Identity provider"),
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> ActixResult<Arc<dyn ObjectCache>> {
        match &self.cache {
            Some(cache) => Ok(cache.clone()),
            None => super::shared::<dyn ObjectCache>(request, "Cache"),
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    /// 以请求中的当前用户恢复会话
    pub(crate) fn session(&self, request: &HttpRequest) -> ActixResult<SessionFacade> {
        let identity = self.get_identity(request)?;
        Ok(SessionFacade::restore(
            identity,
            RequireJWT::extract_user_claims(request),
        ))
    }

    // 注册
    pub async fn register(
        &self,
        register_request: RegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, register_request, request).await
    }

    // 邮箱密码登录
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 第三方登录
    pub async fn login_with_provider(
        &self,
        provider: &str,
        login_request: ProviderLoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_provider_login(self, provider, login_request, request).await
    }

    // 发送重置邮件
    pub async fn reset_password(
        &self,
        reset_request: PasswordResetRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        password::handle_reset_password(self, reset_request, request).await
    }

    // 使用重置码设置新密码
    pub async fn confirm_password_reset(
        &self,
        confirm_request: PasswordResetConfirmRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        password::handle_confirm_password_reset(self, confirm_request, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    // 获取当前用户
    pub async fn get_user(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_get_user(self, request).await
    }

    // 更新显示名
    pub async fn update_profile(
        &self,
        update_request: UpdateProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_update_profile(self, update_request, request).await
    }

    // 更新邮箱
    pub async fn update_email(
        &self,
        update_request: UpdateEmailRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_update_email(self, update_request, request).await
    }

    // 修改密码
    pub async fn update_password(
        &self,
        update_request: UpdatePasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        password::handle_update_password(self, update_request, request).await
    }

    // 登出
    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(self, request).await
    }
}

/// 会话操作失败时的 HTTP 状态与错误码
pub(crate) fn failure_status(op: SessionOp, err: &CampusError) -> (StatusCode, ErrorCode) {
    match err {
        CampusError::InvalidCredentials(_) => (StatusCode::UNAUTHORIZED, ErrorCode::AuthFailed),
        CampusError::RateLimited(_) => {
            (StatusCode::TOO_MANY_REQUESTS, ErrorCode::RateLimitExceeded)
        }
        CampusError::EmailAlreadyInUse(_) => (StatusCode::CONFLICT, ErrorCode::EmailAlreadyExists),
        CampusError::WeakPassword(_) => (StatusCode::BAD_REQUEST, ErrorCode::PasswordInvalid),
        CampusError::InvalidEmail(_) => (StatusCode::BAD_REQUEST, ErrorCode::EmailInvalid),
        CampusError::AccountNotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::AccountNotFound),
        CampusError::InvalidProviderToken(_) => {
            (StatusCode::UNAUTHORIZED, ErrorCode::ProviderTokenInvalid)
        }
        CampusError::Authentication(_) if op == SessionOp::ConfirmPasswordReset => {
            (StatusCode::BAD_REQUEST, ErrorCode::PasswordResetFailed)
        }
        CampusError::Authentication(_) => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized),
        CampusError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest),
        _ => {
            let code = match op {
                SessionOp::Register => ErrorCode::RegisterFailed,
                SessionOp::Login | SessionOp::LoginWithProvider(_) => ErrorCode::AuthFailed,
                SessionOp::ResetPassword | SessionOp::ConfirmPasswordReset => {
                    ErrorCode::PasswordResetFailed
                }
                SessionOp::UpdateProfile | SessionOp::UpdateEmail | SessionOp::UpdatePassword => {
                    ErrorCode::ProfileUpdateFailed
                }
                SessionOp::Logout => ErrorCode::LogoutFailed,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, code)
        }
    }
}

/// 失败响应，消息取会话门面记录的提示
pub(crate) fn session_failure(
    op: SessionOp,
    facade: &SessionFacade,
    err: &CampusError,
) -> HttpResponse {
    let (status, code) = failure_status(op, err);
    let message = facade.error().unwrap_or(op.fallback_message());
    HttpResponse::build(status).json(ApiResponse::error_empty(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ProviderKind;

    #[test]
    fn test_failure_status_maps_identity_errors() {
        assert_eq!(
            failure_status(SessionOp::Login, &CampusError::invalid_credentials("x")),
            (StatusCode::UNAUTHORIZED, ErrorCode::AuthFailed)
        );
        assert_eq!(
            failure_status(SessionOp::Register, &CampusError::email_already_in_use("x")),
            (StatusCode::CONFLICT, ErrorCode::EmailAlreadyExists)
        );
        assert_eq!(
            failure_status(SessionOp::Login, &CampusError::rate_limited("x")),
            (StatusCode::TOO_MANY_REQUESTS, ErrorCode::RateLimitExceeded)
        );
        assert_eq!(
            failure_status(
                SessionOp::LoginWithProvider(ProviderKind::Google),
                &CampusError::invalid_provider_token("x")
            ),
            (StatusCode::UNAUTHORIZED, ErrorCode::ProviderTokenInvalid)
        );
    }

    #[test]
    fn test_failure_status_reset_code_and_fallback() {
        assert_eq!(
            failure_status(
                SessionOp::ConfirmPasswordReset,
                &CampusError::authentication("expired")
            ),
            (StatusCode::BAD_REQUEST, ErrorCode::PasswordResetFailed)
        );
        assert_eq!(
            failure_status(SessionOp::UpdateEmail, &CampusError::authentication("x")),
            (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized)
        );
        assert_eq!(
            failure_status(SessionOp::Logout, &CampusError::database_operation("down")),
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::LogoutFailed)
        );
    }
}
