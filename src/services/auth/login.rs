use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::identity::ProviderKind;
use crate::models::auth::requests::{LoginRequest, ProviderLoginRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::session::messages::SessionOp;

use super::{AuthService, session_failure, token::issue_session};

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut session = service.session(request)?;

    match session
        .login(login_request.email.trim(), &login_request.password)
        .await
    {
        Ok(user) => Ok(issue_session(
            service,
            user,
            login_request.remember_me,
            "Connexion réussie",
        )),
        Err(err) => Ok(session_failure(SessionOp::Login, &session, &err)),
    }
}

pub async fn handle_provider_login(
    service: &AuthService,
    provider: &str,
    login_request: ProviderLoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let kind = match provider.parse::<ProviderKind>() {
        Ok(kind) => kind,
        Err(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                format!("Fournisseur de connexion inconnu: {provider}"),
            )));
        }
    };

    let mut session = service.session(request)?;
    match session
        .login_with_provider(kind, login_request.id_token.trim())
        .await
    {
        Ok(user) => Ok(issue_session(
            service,
            user,
            login_request.remember_me,
            "Connexion réussie",
        )),
        Err(err) => Ok(session_failure(
            SessionOp::LoginWithProvider(kind),
            &session,
            &err,
        )),
    }
}
