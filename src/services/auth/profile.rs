use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::user_cache_key;
use crate::models::ApiResponse;
use crate::models::auth::requests::{UpdateEmailRequest, UpdateProfileRequest};
use crate::models::auth::responses::UserInfoResponse;
use crate::session::messages::{MSG_PROFILE_UPDATED, SessionOp};
use crate::utils::jwt::JwtUtils;

use super::{AuthService, session_failure};

// 当前令牌对应的用户缓存已过时
async fn forget_cached_user(service: &AuthService, request: &HttpRequest) -> ActixResult<()> {
    if let Some(token) = JwtUtils::extract_bearer_token(request) {
        service
            .get_cache(request)?
            .remove(&user_cache_key(&token))
            .await;
    }
    Ok(())
}

pub async fn handle_update_profile(
    service: &AuthService,
    update_request: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut session = service.session(request)?;

    let photo_url = update_request
        .photo_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());

    match session
        .update_profile(update_request.display_name.trim(), photo_url)
        .await
    {
        Ok(user) => {
            forget_cached_user(service, request).await?;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserInfoResponse { user },
                MSG_PROFILE_UPDATED,
            )))
        }
        Err(err) => Ok(session_failure(SessionOp::UpdateProfile, &session, &err)),
    }
}

pub async fn handle_update_email(
    service: &AuthService,
    update_request: UpdateEmailRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut session = service.session(request)?;

    match session.update_email(update_request.email.trim()).await {
        Ok(user) => {
            forget_cached_user(service, request).await?;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserInfoResponse { user },
                MSG_PROFILE_UPDATED,
            )))
        }
        Err(err) => Ok(session_failure(SessionOp::UpdateEmail, &session, &err)),
    }
}
