use serde::Deserialize;
use ts_rs::TS;

// 注册请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// 姓名，写入资料记录的 full_name
    pub display_name: String,
    #[serde(default)]
    pub remember_me: bool,
}

// 邮箱密码登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/auth.ts")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// 是否记住我
    #[serde(default)]
    pub remember_me: bool,
}

// 第三方登录请求，id_token 由客户端完成 OAuth 流程后取得
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/auth.ts")]
pub struct ProviderLoginRequest {
    pub id_token: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/auth.ts")]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/auth.ts")]
pub struct PasswordResetConfirmRequest {
    pub code: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/auth.ts")]
pub struct UpdateProfileRequest {
    pub display_name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/auth.ts")]
pub struct UpdateEmailRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/auth.ts")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}
