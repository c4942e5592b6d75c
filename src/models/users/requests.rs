use serde::Deserialize;
use ts_rs::TS;

use super::entities::{SignInProvider, UserRole};

// 账户创建参数（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub role: UserRole,
    pub provider: SignInProvider,
}

// 账户更新参数，None 表示不修改
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub role: Option<UserRole>,
}

// 管理员新建用户的表单
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/user.ts")]
pub struct NewUserRequest {
    pub display_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
}

/// 表单层面的最短密码长度，身份服务还会按配置再校验一次
pub const NEW_USER_MIN_PASSWORD_LENGTH: usize = 6;

impl NewUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.display_name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.trim().is_empty()
        {
            return Err("Veuillez remplir tous les champs");
        }
        if self.password.chars().count() < NEW_USER_MIN_PASSWORD_LENGTH {
            return Err("Le mot de passe doit contenir au moins 6 caractères");
        }
        Ok(())
    }
}
