//! 第三方登录身份令牌校验
//!
//! 客户端完成 OAuth 流程后把提供方签发的身份令牌交给后端，后端用配置中的
//! client secret 按 HS256 校验签名、受众与过期时间。

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ProviderKind;
use crate::config::ProviderConfig;
use crate::errors::{CampusError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderClaims {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    pub aud: String,
    pub exp: usize,
}

pub fn verify_provider_token(
    kind: ProviderKind,
    token: &str,
    config: &ProviderConfig,
) -> Result<ProviderClaims> {
    if !config.enabled || config.client_secret.is_empty() {
        return Err(CampusError::invalid_provider_token(format!(
            "{kind} sign-in is not enabled"
        )));
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.client_id.as_str()]);

    let claims = decode::<ProviderClaims>(
        token,
        &DecodingKey::from_secret(config.client_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!("{} identity token rejected: {}", kind, e);
        CampusError::invalid_provider_token(format!("{kind} identity token rejected: {e}"))
    })?;

    if claims.email.trim().is_empty() {
        return Err(CampusError::invalid_provider_token(format!(
            "{kind} identity token carries no email"
        )));
    }

    Ok(claims)
}

#[cfg(test)]
pub mod testing {
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    pub fn sign_provider_token(
        client_id: &str,
        secret: &str,
        email: &str,
        name: Option<&str>,
        ttl_secs: i64,
    ) -> String {
        let claims = ProviderClaims {
            sub: format!("ext-{email}"),
            email: email.to_string(),
            name: name.map(str::to_string),
            picture: None,
            aud: client_id.to_string(),
            exp: (chrono::Utc::now().timestamp() + ttl_secs) as usize,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::sign_provider_token;
    use super::*;

    fn google() -> ProviderConfig {
        ProviderConfig {
            enabled: true,
            client_id: "campus-mobile".into(),
            client_secret: "google-secret".into(),
        }
    }

    #[test]
    fn test_accepts_valid_token() {
        let token = sign_provider_token(
            "campus-mobile",
            "google-secret",
            "awa@univ.fr",
            Some("Awa Diop"),
            600,
        );
        let claims = verify_provider_token(ProviderKind::Google, &token, &google()).unwrap();
        assert_eq!(claims.email, "awa@univ.fr");
        assert_eq!(claims.name.as_deref(), Some("Awa Diop"));
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let token = sign_provider_token("campus-mobile", "other", "awa@univ.fr", None, 600);
        let err = verify_provider_token(ProviderKind::Google, &token, &google()).unwrap_err();
        assert!(matches!(err, CampusError::InvalidProviderToken(_)));
    }

    #[test]
    fn test_rejects_wrong_audience() {
        let token = sign_provider_token("another-app", "google-secret", "awa@univ.fr", None, 600);
        assert!(verify_provider_token(ProviderKind::Google, &token, &google()).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let token = sign_provider_token("campus-mobile", "google-secret", "awa@univ.fr", None, -600);
        assert!(verify_provider_token(ProviderKind::Google, &token, &google()).is_err());
    }

    #[test]
    fn test_disabled_provider_rejects_everything() {
        let token = sign_provider_token("campus-mobile", "google-secret", "awa@univ.fr", None, 600);
        let config = ProviderConfig {
            enabled: false,
            ..google()
        };
        assert!(verify_provider_token(ProviderKind::Github, &token, &config).is_err());
    }
}
