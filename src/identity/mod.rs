//! 身份提供方边界
//!
//! 会话门面只依赖 [`IdentityProvider`]，每个方法对应一次后端往返。

pub mod mailer;
pub mod provider_token;
pub mod storage_provider;

use async_trait::async_trait;

pub use mailer::{LogMailer, MailMessage, Mailer};
pub use storage_provider::{IdentitySettings, StorageIdentityProvider};

use crate::errors::Result;
use crate::models::users::entities::{SignInProvider, User, UserRole};

/// 支持的第三方登录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Google,
    Github,
}

impl ProviderKind {
    pub fn sign_in_provider(self) -> SignInProvider {
        match self {
            ProviderKind::Google => SignInProvider::Google,
            ProviderKind::Github => SignInProvider::Github,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Google => write!(f, "Google"),
            ProviderKind::Github => write!(f, "Github"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(ProviderKind::Google),
            "github" => Ok(ProviderKind::Github),
            _ => Err(format!("Unsupported sign-in provider: {s}")),
        }
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 创建邮箱密码账户并写入资料记录，自助注册的账户都是学生
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<User> {
        self.create_account_with_role(email, password, display_name, UserRole::Student)
            .await
    }

    /// 管理员代为创建账户时指定角色
    async fn create_account_with_role(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        role: UserRole,
    ) -> Result<User>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<User>;
    /// 校验第三方身份令牌，首次登录时创建账户
    async fn sign_in_with_provider(&self, kind: ProviderKind, id_token: &str) -> Result<User>;
    async fn send_password_reset(&self, email: &str) -> Result<()>;
    async fn confirm_password_reset(&self, code: &str, new_password: &str) -> Result<()>;
    async fn update_display_name(
        &self,
        user_id: &str,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<User>;
    async fn update_email(&self, user_id: &str, email: &str) -> Result<User>;
    /// 重新验证当前密码
    async fn reauthenticate(&self, user_id: &str, password: &str) -> Result<()>;
    async fn update_password(&self, user_id: &str, new_password: &str) -> Result<()>;
    async fn sign_out(&self, user_id: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parses_case_insensitively() {
        assert_eq!("google".parse::<ProviderKind>(), Ok(ProviderKind::Google));
        assert_eq!("GitHub".parse::<ProviderKind>(), Ok(ProviderKind::Github));
        assert!("facebook".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_provider_kind_maps_to_sign_in_provider() {
        assert_eq!(
            ProviderKind::Github.sign_in_provider(),
            SignInProvider::Github
        );
        assert_eq!(ProviderKind::Google.to_string(), "Google");
    }
}
