use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::user_cache_key;
use crate::models::ApiResponse;
use crate::session::messages::SessionOp;
use crate::utils::jwt::JwtUtils;

use super::{AuthService, session_failure};

/// 处理用户登出
/// 清除当前令牌的用户缓存，并通过空的 refresh_token cookie 清除客户端登录状态
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut session = service.session(request)?;

    if let Err(err) = session.logout().await {
        return Ok(session_failure(SessionOp::Logout, &session, &err));
    }

    if let Some(token) = JwtUtils::extract_bearer_token(request) {
        service
            .get_cache(request)?
            .remove(&user_cache_key(&token))
            .await;
    }

    // max_age=0 会让浏览器删除该 cookie
    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::<()>::success_empty("Déconnexion réussie")))
}
