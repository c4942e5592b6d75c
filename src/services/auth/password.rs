use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::auth::requests::{
    PasswordResetConfirmRequest, PasswordResetRequest, UpdatePasswordRequest,
};
use crate::session::messages::{MSG_PASSWORD_UPDATED, SessionOp};

use super::{AuthService, session_failure};

pub async fn handle_reset_password(
    service: &AuthService,
    reset_request: PasswordResetRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut session = service.session(request)?;

    match session.reset_password(reset_request.email.trim()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Un email de réinitialisation a été envoyé à votre adresse.",
        ))),
        Err(err) => Ok(session_failure(SessionOp::ResetPassword, &session, &err)),
    }
}

pub async fn handle_confirm_password_reset(
    service: &AuthService,
    confirm_request: PasswordResetConfirmRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut session = service.session(request)?;

    match session
        .confirm_password_reset(confirm_request.code.trim(), &confirm_request.new_password)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Votre mot de passe a été réinitialisé. Vous pouvez maintenant vous connecter.",
        ))),
        Err(err) => Ok(session_failure(
            SessionOp::ConfirmPasswordReset,
            &session,
            &err,
        )),
    }
}

pub async fn handle_update_password(
    service: &AuthService,
    update_request: UpdatePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut session = service.session(request)?;

    match session
        .update_password(
            &update_request.current_password,
            &update_request.new_password,
        )
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(MSG_PASSWORD_UPDATED))),
        Err(err) => Ok(session_failure(SessionOp::UpdatePassword, &session, &err)),
    }
}
