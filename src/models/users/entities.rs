use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../mobile/src/types/generated/user.ts")]
pub enum UserRole {
    #[default]
    Student,   // 学生
    Professor, // 教师
    Admin,     // 管理员
}

impl UserRole {
    pub const STUDENT: &'static str = "student";
    pub const PROFESSOR: &'static str = "professor";
    pub const ADMIN: &'static str = "admin";

    /// 列表中展示的角色名
    pub fn label(self) -> &'static str {
        match self {
            UserRole::Student => "Étudiant",
            UserRole::Professor => "Professeur",
            UserRole::Admin => "Administrateur",
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: student, professor, admin"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Professor => write!(f, "{}", UserRole::PROFESSOR),
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::PROFESSOR => Ok(UserRole::Professor),
            UserRole::ADMIN => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 登录方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../mobile/src/types/generated/user.ts")]
pub enum SignInProvider {
    Password,
    Google,
    Github,
}

impl std::fmt::Display for SignInProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignInProvider::Password => write!(f, "password"),
            SignInProvider::Google => write!(f, "google"),
            SignInProvider::Github => write!(f, "github"),
        }
    }
}

impl std::str::FromStr for SignInProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "password" => Ok(SignInProvider::Password),
            "google" => Ok(SignInProvider::Google),
            "github" => Ok(SignInProvider::Github),
            _ => Err(format!("Invalid sign-in provider: {s}")),
        }
    }
}

// 用户实体（身份 + 资料）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/user.ts")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub role: UserRole,
    pub provider: SignInProvider,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// 展示用名称：显示名优先，其次邮箱
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            &self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

/// `users` 集合中的资料记录，以用户 ID 为文档 ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../mobile/src/types/generated/user.ts")]
pub struct UserProfileRecord {
    pub full_name: String,
    pub email: String,
    // 早期记录没有角色字段
    #[serde(default)]
    pub role: UserRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [UserRole::Student, UserRole::Professor, UserRole::Admin] {
            assert_eq!(role.to_string().parse::<UserRole>(), Ok(role));
        }
        assert!("teacher".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_labels_and_default() {
        assert_eq!(UserRole::Student.label(), "Étudiant");
        assert_eq!(UserRole::Professor.label(), "Professeur");
        assert_eq!(UserRole::Admin.label(), "Administrateur");

        let record: UserProfileRecord = serde_json::from_value(serde_json::json!({
            "full_name": "Awa Diop",
            "email": "awa@univ.fr",
            "created_at": "2025-03-01T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(record.role, UserRole::Student);
    }

    #[test]
    fn test_role_rejects_unknown_value() {
        let result: Result<UserRole, _> = serde_json::from_str("\"guest\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: "u1".into(),
            email: "a@b.fr".into(),
            password_hash: "$argon2id$secret".into(),
            display_name: None,
            photo_url: None,
            role: UserRole::Student,
            provider: SignInProvider::Password,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert_eq!(user.label(), "a@b.fr");
    }
}
