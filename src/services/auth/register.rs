use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::requests::RegisterRequest;
use crate::session::messages::SessionOp;

use super::{AuthService, session_failure, token::issue_session};

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let mut session = service.session(request)?;

    match session
        .register(
            register_request.email.trim(),
            &register_request.password,
            register_request.display_name.trim(),
        )
        .await
    {
        Ok(user) => Ok(issue_session(
            service,
            user,
            register_request.remember_me,
            "Inscription réussie",
        )),
        Err(err) => Ok(session_failure(SessionOp::Register, &session, &err)),
    }
}
