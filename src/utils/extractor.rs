//! 路径参数提取器
//!
//! 在进入处理函数前校验路径中的标识符，非法时直接返回 400。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_document_id;

fn reject(message: String) -> actix_web::Error {
    InternalError::from_response(
        message.clone(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

macro_rules! define_safe_path_param {
    ($(#[$meta:meta])* $name:ident, $param:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub String);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                let result = match req.match_info().get($param) {
                    Some(value) => validate_document_id(value)
                        .map(|_| $name(value.to_string()))
                        .map_err(|e| reject(format!("Invalid path parameter '{}': {e}", $param))),
                    None => Err(reject(format!("Missing path parameter '{}'", $param))),
                };
                ready(result)
            }
        }
    };
}

define_safe_path_param!(
    /// 文档 ID（`{id}`）
    SafeDocumentId,
    "id"
);
define_safe_path_param!(
    /// 文件下载 token（`{token}`）
    SafeFileToken,
    "token"
);
define_safe_path_param!(
    /// 第三方登录提供方（`{provider}`）
    SafeProviderName,
    "provider"
);

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_id_is_extracted() {
        let req = TestRequest::default()
            .param("id", "5b1c-42_a")
            .to_http_request();
        let id = SafeDocumentId::extract(&req).await.unwrap();
        assert_eq!(id.0, "5b1c-42_a");
    }

    #[actix_web::test]
    async fn test_invalid_id_is_rejected() {
        let req = TestRequest::default()
            .param("id", "a/../b")
            .to_http_request();
        assert!(SafeDocumentId::extract(&req).await.is_err());

        let req = TestRequest::default().to_http_request();
        assert!(SafeFileToken::extract(&req).await.is_err());
    }
}
