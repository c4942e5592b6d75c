//! 基于 `Storage` 的身份提供方
//!
//! 账户凭据保存在 `users` 表，资料记录保存在 `users` 文档集合；
//! 登录失败计数与密码重置码放在对象缓存中，由 TTL 负责过期。

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::mailer::{MailMessage, Mailer};
use super::provider_token::verify_provider_token;
use super::{IdentityProvider, ProviderKind};
use crate::cache::{CacheResult, ObjectCache, get_json, insert_json};
use crate::config::{AppConfig, Argon2Config, AuthConfig, ProviderConfig, ProvidersConfig};
use crate::errors::{CampusError, Result};
use crate::models::users::entities::{SignInProvider, User, UserProfileRecord, UserRole};
use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest};
use crate::storage::Storage;
use crate::utils::password::{hash_password_with, verify_password};
use crate::utils::random_code::generate_random_code;
use crate::utils::validate::{normalize_email, validate_email, validate_password};

/// 资料记录所在集合
pub const PROFILE_COLLECTION: &str = "users";

const RESET_CODE_LENGTH: usize = 8;

/// 身份服务用到的配置片段
#[derive(Debug, Clone, Default)]
pub struct IdentitySettings {
    pub auth: AuthConfig,
    pub argon2: Argon2Config,
    pub providers: ProvidersConfig,
}

impl From<&AppConfig> for IdentitySettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            auth: config.auth.clone(),
            argon2: config.argon2.clone(),
            providers: config.providers.clone(),
        }
    }
}

impl IdentitySettings {
    fn provider(&self, kind: ProviderKind) -> &ProviderConfig {
        match kind {
            ProviderKind::Google => &self.providers.google,
            ProviderKind::Github => &self.providers.github,
        }
    }
}

/// 窗口内的登录失败计数
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FailedAttempts {
    count: u32,
    window_started_at: i64,
}

impl FailedAttempts {
    fn is_active(&self, now: i64, window: u64) -> bool {
        now - self.window_started_at < window as i64
    }
}

fn failure_key(email: &str) -> String {
    format!("login_failures:{email}")
}

fn reset_code_key(code: &str) -> String {
    format!("password_reset:{code}")
}

pub struct StorageIdentityProvider {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
    mailer: Arc<dyn Mailer>,
    settings: IdentitySettings,
}

impl StorageIdentityProvider {
    pub fn new(
        storage: Arc<dyn Storage>,
        cache: Arc<dyn ObjectCache>,
        mailer: Arc<dyn Mailer>,
        settings: IdentitySettings,
    ) -> Self {
        Self {
            storage,
            cache,
            mailer,
            settings,
        }
    }

    fn checked_email(email: &str) -> Result<String> {
        let email = normalize_email(email);
        validate_email(&email).map_err(CampusError::invalid_email)?;
        Ok(email)
    }

    fn check_password_policy(&self, password: &str) -> Result<()> {
        let result = validate_password(password, self.settings.auth.min_password_length);
        if !result.is_valid {
            return Err(CampusError::weak_password(result.error_message()));
        }
        Ok(())
    }

    async fn load_user(&self, user_id: &str) -> Result<User> {
        self.storage
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| CampusError::account_not_found(format!("No account with id {user_id}")))
    }

    async fn merge_profile(&self, user_id: &str, patch: serde_json::Value) -> Result<()> {
        self.storage
            .merge_document(PROFILE_COLLECTION, user_id, patch)
            .await?;
        Ok(())
    }

    async fn write_full_profile(&self, user: &User, full_name: &str) -> Result<()> {
        let record = UserProfileRecord {
            full_name: full_name.to_string(),
            email: user.email.clone(),
            role: user.role,
            created_at: chrono::Utc::now(),
        };
        self.merge_profile(&user.id, serde_json::to_value(record)?)
            .await
    }

    async fn ensure_not_locked(&self, email: &str) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let auth = &self.settings.auth;
        if let Some(attempts) =
            get_json::<FailedAttempts>(self.cache.as_ref(), &failure_key(email)).await
            && attempts.is_active(now, auth.lockout_window)
            && attempts.count >= auth.max_failed_attempts
        {
            warn!("Sign-in locked for {} after {} failures", email, attempts.count);
            return Err(CampusError::rate_limited(format!(
                "Too many failed sign-in attempts for {email}"
            )));
        }
        Ok(())
    }

    async fn record_failure(&self, email: &str) {
        let now = chrono::Utc::now().timestamp();
        let window = self.settings.auth.lockout_window;
        let key = failure_key(email);

        let mut attempts = get_json::<FailedAttempts>(self.cache.as_ref(), &key)
            .await
            .filter(|attempts| attempts.is_active(now, window))
            .unwrap_or(FailedAttempts {
                count: 0,
                window_started_at: now,
            });
        attempts.count += 1;

        // 计数随窗口一起过期
        let remaining = (window as i64 - (now - attempts.window_started_at)).max(1) as u64;
        insert_json(self.cache.as_ref(), &key, &attempts, remaining).await;
    }

    async fn invalid_credentials(&self, email: &str) -> CampusError {
        self.record_failure(email).await;
        CampusError::invalid_credentials("Email or password is incorrect")
    }
}

#[async_trait]
impl IdentityProvider for StorageIdentityProvider {
    async fn create_account_with_role(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        role: UserRole,
    ) -> Result<User> {
        let email = Self::checked_email(email)?;
        self.check_password_policy(password)?;

        if self.storage.get_user_by_email(&email).await?.is_some() {
            return Err(CampusError::email_already_in_use(format!(
                "An account already exists for {email}"
            )));
        }

        let password_hash = hash_password_with(password, &self.settings.argon2)?;
        let display_name = display_name.trim();
        let user = self
            .storage
            .create_user(CreateUserRequest {
                email,
                password_hash,
                display_name: (!display_name.is_empty()).then(|| display_name.to_string()),
                photo_url: None,
                role,
                provider: SignInProvider::Password,
            })
            .await?;

        self.write_full_profile(&user, display_name).await?;
        info!("Account created: {} ({}, {})", user.email, user.id, user.role);
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let email = Self::checked_email(email)?;
        self.ensure_not_locked(&email).await?;

        let Some(user) = self.storage.get_user_by_email(&email).await? else {
            return Err(self.invalid_credentials(&email).await);
        };

        // 第三方账户没有本地密码
        if user.password_hash.is_empty() || !verify_password(password, &user.password_hash) {
            return Err(self.invalid_credentials(&email).await);
        }

        self.cache.remove(&failure_key(&email)).await;
        debug!("Password sign-in succeeded for {}", user.id);
        Ok(user)
    }

    async fn sign_in_with_provider(&self, kind: ProviderKind, id_token: &str) -> Result<User> {
        let claims = verify_provider_token(kind, id_token, self.settings.provider(kind))?;
        let email = Self::checked_email(&claims.email)?;
        let full_name = claims
            .name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| email.clone());

        let user = match self.storage.get_user_by_email(&email).await? {
            Some(user) if user.display_name.is_none() => {
                let updated = self
                    .storage
                    .update_user(
                        &user.id,
                        UpdateUserRequest {
                            display_name: claims.name.clone(),
                            photo_url: claims.picture.clone(),
                            ..Default::default()
                        },
                    )
                    .await?;
                updated.unwrap_or(user)
            }
            Some(user) => user,
            None => {
                let user = self
                    .storage
                    .create_user(CreateUserRequest {
                        email,
                        password_hash: String::new(),
                        display_name: claims.name.clone(),
                        photo_url: claims.picture.clone(),
                        role: UserRole::Student,
                        provider: kind.sign_in_provider(),
                    })
                    .await?;
                info!("Account created through {}: {}", kind, user.id);
                user
            }
        };

        self.write_full_profile(&user, &full_name).await?;
        Ok(user)
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        let email = Self::checked_email(email)?;
        let user = self
            .storage
            .get_user_by_email(&email)
            .await?
            .ok_or_else(|| CampusError::account_not_found(format!("No account for {email}")))?;

        let code = generate_random_code(RESET_CODE_LENGTH);
        let ttl = self.settings.auth.reset_code_ttl;
        self.cache
            .insert_raw(reset_code_key(&code), user.id.clone(), ttl)
            .await;

        self.mailer
            .send(MailMessage::password_reset(&user.email, &code, ttl / 60))
            .await?;
        info!("Password reset code issued for {}", user.id);
        Ok(())
    }

    async fn confirm_password_reset(&self, code: &str, new_password: &str) -> Result<()> {
        let key = reset_code_key(&code.trim().to_uppercase());
        let user_id = match self.cache.get_raw(&key).await {
            CacheResult::Found(user_id) => user_id,
            _ => {
                return Err(CampusError::authentication(
                    "Reset code is invalid or has expired",
                ));
            }
        };
        self.check_password_policy(new_password)?;

        let password_hash = hash_password_with(new_password, &self.settings.argon2)?;
        let user = self
            .storage
            .update_user(
                &user_id,
                UpdateUserRequest {
                    password_hash: Some(password_hash),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| CampusError::account_not_found(format!("No account with id {user_id}")))?;

        self.cache.remove(&key).await;
        self.cache.remove(&failure_key(&user.email)).await;
        info!("Password reset completed for {}", user.id);
        Ok(())
    }

    async fn update_display_name(
        &self,
        user_id: &str,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<User> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(CampusError::validation("Display name must not be empty"));
        }

        let user = self
            .storage
            .update_user(
                user_id,
                UpdateUserRequest {
                    display_name: Some(display_name.to_string()),
                    photo_url: photo_url.map(str::to_string),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| CampusError::account_not_found(format!("No account with id {user_id}")))?;

        self.merge_profile(user_id, serde_json::json!({ "full_name": display_name }))
            .await?;
        Ok(user)
    }

    async fn update_email(&self, user_id: &str, email: &str) -> Result<User> {
        let email = Self::checked_email(email)?;
        if let Some(owner) = self.storage.get_user_by_email(&email).await?
            && owner.id != user_id
        {
            return Err(CampusError::email_already_in_use(format!(
                "An account already exists for {email}"
            )));
        }

        let user = self
            .storage
            .update_user(
                user_id,
                UpdateUserRequest {
                    email: Some(email.clone()),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| CampusError::account_not_found(format!("No account with id {user_id}")))?;

        self.merge_profile(user_id, serde_json::json!({ "email": email }))
            .await?;
        Ok(user)
    }

    async fn reauthenticate(&self, user_id: &str, password: &str) -> Result<()> {
        let user = self.load_user(user_id).await?;
        if user.password_hash.is_empty() || !verify_password(password, &user.password_hash) {
            return Err(CampusError::invalid_credentials(
                "Current password is incorrect",
            ));
        }
        Ok(())
    }

    async fn update_password(&self, user_id: &str, new_password: &str) -> Result<()> {
        self.check_password_policy(new_password)?;
        let password_hash = hash_password_with(new_password, &self.settings.argon2)?;
        self.storage
            .update_user(
                user_id,
                UpdateUserRequest {
                    password_hash: Some(password_hash),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| CampusError::account_not_found(format!("No account with id {user_id}")))?;
        Ok(())
    }

    async fn sign_out(&self, user_id: &str) -> Result<()> {
        // 令牌无状态，服务端只需确认账户存在
        self.load_user(user_id).await?;
        debug!("User {} signed out", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::identity::mailer::testing::RecordingMailer;
    use crate::identity::provider_token::testing::sign_provider_token;
    use crate::models::documents::entities::StoredDocument;
    use crate::storage::memory::MemoryStorage;

    struct Fixture {
        storage: Arc<MemoryStorage>,
        mailer: Arc<RecordingMailer>,
        provider: StorageIdentityProvider,
    }

    fn fixture() -> Fixture {
        let storage = Arc::new(MemoryStorage::new());
        let mailer = Arc::new(RecordingMailer::default());
        let settings = IdentitySettings {
            auth: AuthConfig {
                max_failed_attempts: 3,
                ..AuthConfig::default()
            },
            argon2: Argon2Config {
                memory_cost: 1024,
                time_cost: 1,
                parallelism: 1,
            },
            providers: ProvidersConfig {
                google: ProviderConfig {
                    enabled: true,
                    client_id: "campus-mobile".into(),
                    client_secret: "google-secret".into(),
                },
                github: ProviderConfig::default(),
            },
        };
        let provider = StorageIdentityProvider::new(
            storage.clone(),
            Arc::new(MokaCacheWrapper::with_settings(1_000, 60)),
            mailer.clone(),
            settings,
        );
        Fixture {
            storage,
            mailer,
            provider,
        }
    }

    async fn profile(storage: &MemoryStorage, user_id: &str) -> StoredDocument {
        storage
            .get_document(PROFILE_COLLECTION, user_id)
            .await
            .unwrap()
            .expect("profile record")
    }

    #[tokio::test]
    async fn test_create_account_writes_profile() {
        let f = fixture();
        let user = f
            .provider
            .create_account(" Awa@Univ.fr ", "secret1", "Awa Diop")
            .await
            .unwrap();

        assert_eq!(user.email, "awa@univ.fr");
        assert_eq!(user.display_name.as_deref(), Some("Awa Diop"));
        assert_eq!(user.provider, SignInProvider::Password);

        let record = profile(&f.storage, &user.id).await;
        assert_eq!(record.data["full_name"], "Awa Diop");
        assert_eq!(record.data["email"], "awa@univ.fr");
        assert_eq!(record.data["role"], "student");
    }

    #[tokio::test]
    async fn test_create_account_with_role_records_role() {
        let f = fixture();
        let user = f
            .provider
            .create_account_with_role(
                "prof@univ.fr",
                "secret1",
                "Moussa Ndiaye",
                UserRole::Professor,
            )
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Professor);

        let stored = f.storage.get_user_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.role, UserRole::Professor);
        let record = profile(&f.storage, &user.id).await;
        assert_eq!(record.data["role"], "professor");
        assert_eq!(record.data["full_name"], "Moussa Ndiaye");
    }

    #[tokio::test]
    async fn test_create_account_rejects_bad_input() {
        let f = fixture();
        let err = f
            .provider
            .create_account("not-an-email", "secret1", "X")
            .await
            .unwrap_err();
        assert!(matches!(err, CampusError::InvalidEmail(_)));

        let err = f
            .provider
            .create_account("a@univ.fr", "12345", "X")
            .await
            .unwrap_err();
        assert!(matches!(err, CampusError::WeakPassword(_)));

        f.provider
            .create_account("a@univ.fr", "123456", "X")
            .await
            .unwrap();
        let err = f
            .provider
            .create_account("A@univ.fr", "123456", "Y")
            .await
            .unwrap_err();
        assert!(matches!(err, CampusError::EmailAlreadyInUse(_)));
    }

    #[tokio::test]
    async fn test_sign_in_checks_password() {
        let f = fixture();
        let created = f
            .provider
            .create_account("awa@univ.fr", "secret1", "Awa")
            .await
            .unwrap();

        let user = f.provider.sign_in("AWA@univ.fr", "secret1").await.unwrap();
        assert_eq!(user.id, created.id);

        let err = f.provider.sign_in("awa@univ.fr", "wrong").await.unwrap_err();
        assert!(matches!(err, CampusError::InvalidCredentials(_)));

        let err = f.provider.sign_in("ghost@univ.fr", "secret1").await.unwrap_err();
        assert!(matches!(err, CampusError::InvalidCredentials(_)));
    }

    #[tokio::test]
    async fn test_repeated_failures_lock_sign_in() {
        let f = fixture();
        f.provider
            .create_account("awa@univ.fr", "secret1", "Awa")
            .await
            .unwrap();

        for _ in 0..3 {
            let err = f.provider.sign_in("awa@univ.fr", "wrong").await.unwrap_err();
            assert!(matches!(err, CampusError::InvalidCredentials(_)));
        }

        // 锁定期间正确密码也被拒绝
        let err = f.provider.sign_in("awa@univ.fr", "secret1").await.unwrap_err();
        assert!(matches!(err, CampusError::RateLimited(_)));
    }

    #[tokio::test]
    async fn test_successful_sign_in_resets_failures() {
        let f = fixture();
        f.provider
            .create_account("awa@univ.fr", "secret1", "Awa")
            .await
            .unwrap();

        for _ in 0..2 {
            let _ = f.provider.sign_in("awa@univ.fr", "wrong").await;
        }
        f.provider.sign_in("awa@univ.fr", "secret1").await.unwrap();
        for _ in 0..2 {
            let _ = f.provider.sign_in("awa@univ.fr", "wrong").await;
        }
        assert!(f.provider.sign_in("awa@univ.fr", "secret1").await.is_ok());
    }

    #[tokio::test]
    async fn test_provider_sign_in_creates_then_reuses_account() {
        let f = fixture();
        let token = sign_provider_token(
            "campus-mobile",
            "google-secret",
            "moussa@gmail.com",
            Some("Moussa Ba"),
            600,
        );

        let first = f
            .provider
            .sign_in_with_provider(ProviderKind::Google, &token)
            .await
            .unwrap();
        assert_eq!(first.provider, SignInProvider::Google);
        assert_eq!(first.display_name.as_deref(), Some("Moussa Ba"));

        let second = f
            .provider
            .sign_in_with_provider(ProviderKind::Google, &token)
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(f.storage.count_users().await.unwrap(), 1);

        let record = profile(&f.storage, &first.id).await;
        assert_eq!(record.data["full_name"], "Moussa Ba");

        // 第三方账户不能用空密码登录
        let err = f.provider.sign_in("moussa@gmail.com", "").await.unwrap_err();
        assert!(matches!(err, CampusError::InvalidCredentials(_)));
    }

    #[tokio::test]
    async fn test_disabled_provider_is_rejected() {
        let f = fixture();
        let token = sign_provider_token("campus-mobile", "google-secret", "x@y.fr", None, 600);
        let err = f
            .provider
            .sign_in_with_provider(ProviderKind::Github, &token)
            .await
            .unwrap_err();
        assert!(matches!(err, CampusError::InvalidProviderToken(_)));
        assert_eq!(f.storage.count_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_password_reset_round_trip() {
        let f = fixture();
        f.provider
            .create_account("awa@univ.fr", "secret1", "Awa")
            .await
            .unwrap();

        let err = f
            .provider
            .send_password_reset("ghost@univ.fr")
            .await
            .unwrap_err();
        assert!(matches!(err, CampusError::AccountNotFound(_)));
        assert!(f.mailer.sent().is_empty());

        f.provider.send_password_reset("awa@univ.fr").await.unwrap();
        let sent = f.mailer.sent();
        assert_eq!(sent.len(), 1);
        let code = sent[0]
            .body
            .split_whitespace()
            .find(|word| word.len() == RESET_CODE_LENGTH && word.chars().all(|c| c.is_ascii_alphanumeric()))
            .expect("code in mail body")
            .to_string();

        f.provider
            .confirm_password_reset(&code.to_lowercase(), "nouveau1")
            .await
            .unwrap();
        assert!(f.provider.sign_in("awa@univ.fr", "nouveau1").await.is_ok());
        assert!(f.provider.sign_in("awa@univ.fr", "secret1").await.is_err());

        // 重置码只能使用一次
        assert!(
            f.provider
                .confirm_password_reset(&code, "encore12")
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_profile_and_email_updates_merge_record() {
        let f = fixture();
        let user = f
            .provider
            .create_account("awa@univ.fr", "secret1", "Awa")
            .await
            .unwrap();

        let updated = f
            .provider
            .update_display_name(&user.id, "Awa Diop", Some("https://cdn/awa.png"))
            .await
            .unwrap();
        assert_eq!(updated.display_name.as_deref(), Some("Awa Diop"));
        assert_eq!(updated.photo_url.as_deref(), Some("https://cdn/awa.png"));

        let updated = f
            .provider
            .update_email(&user.id, "awa.diop@univ.fr")
            .await
            .unwrap();
        assert_eq!(updated.email, "awa.diop@univ.fr");

        let record = profile(&f.storage, &user.id).await;
        assert_eq!(record.data["full_name"], "Awa Diop");
        assert_eq!(record.data["email"], "awa.diop@univ.fr");
        assert!(record.data.get("created_at").is_some());
    }

    #[tokio::test]
    async fn test_update_email_rejects_taken_address() {
        let f = fixture();
        let awa = f
            .provider
            .create_account("awa@univ.fr", "secret1", "Awa")
            .await
            .unwrap();
        f.provider
            .create_account("moussa@univ.fr", "secret1", "Moussa")
            .await
            .unwrap();

        let err = f
            .provider
            .update_email(&awa.id, "moussa@univ.fr")
            .await
            .unwrap_err();
        assert!(matches!(err, CampusError::EmailAlreadyInUse(_)));
        // 改成自己当前的邮箱不算冲突
        assert!(f.provider.update_email(&awa.id, "awa@univ.fr").await.is_ok());
    }

    #[tokio::test]
    async fn test_reauthenticate_then_update_password() {
        let f = fixture();
        let user = f
            .provider
            .create_account("awa@univ.fr", "secret1", "Awa")
            .await
            .unwrap();

        let err = f
            .provider
            .reauthenticate(&user.id, "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, CampusError::InvalidCredentials(_)));

        f.provider.reauthenticate(&user.id, "secret1").await.unwrap();
        f.provider
            .update_password(&user.id, "nouveau1")
            .await
            .unwrap();
        assert!(f.provider.sign_in("awa@univ.fr", "nouveau1").await.is_ok());
    }
}
