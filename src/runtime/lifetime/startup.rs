use crate::cache::register::{get_object_cache_plugin, register_builtin_plugins};
use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::errors::{CampusError, Result};
use crate::identity::storage_provider::PROFILE_COLLECTION;
use crate::identity::{IdentityProvider, IdentitySettings, LogMailer, StorageIdentityProvider};
use crate::models::users::entities::{SignInProvider, UserProfileRecord, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_random_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_ADMIN_EMAIL: &str = "admin@campus.local";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub identity: Arc<dyn IdentityProvider>,
}

// 依次尝试给定的缓存后端
async fn try_cache_backend(name: &str) -> Option<Arc<dyn ObjectCache>> {
    let Some(constructor) = get_object_cache_plugin(name) else {
        warn!("Cache backend '{}' not found in registry", name);
        return None;
    };
    match constructor().await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", name);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", name, e);
            None
        }
    }
}

/// 创建缓存实例，配置的后端不可用时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = &AppConfig::get().cache.cache_type;
    warn!("Attempting to create {} cache backend", cache_type);

    if let Some(cache) = try_cache_backend(cache_type).await {
        return Ok(cache);
    }
    if cache_type != "moka" {
        warn!("Falling back to memory cache");
        if let Some(cache) = try_cache_backend("moka").await {
            return Ok(cache);
        }
    }

    Err(CampusError::cache_plugin_not_found(format!(
        "No cache backend available (tried: {cache_type})"
    )))
}

/// 初始化默认管理员账号
/// 如果存储中没有任何账户，则创建一个默认的 admin 账号
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("Storage already has {} account(s), skipping admin seed", count);
            return;
        }
        Ok(_) => {
            info!("No accounts found, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count accounts: {}, skipping admin seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin_request = CreateUserRequest {
        email: DEFAULT_ADMIN_EMAIL.to_string(),
        password_hash,
        display_name: Some("Administrateur".to_string()),
        photo_url: None,
        role: UserRole::Admin,
        provider: SignInProvider::Password,
    };

    let user = match storage.create_user(admin_request).await {
        Ok(user) => user,
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
            return;
        }
    };
    info!(
        "Default admin account created (ID: {}, email: {})",
        user.id, user.email
    );

    // 资料记录，使管理员出现在用户目录中
    let record = UserProfileRecord {
        full_name: user.label().to_string(),
        email: user.email.clone(),
        role: user.role,
        created_at: user.created_at,
    };
    let written = match serde_json::to_value(record) {
        Ok(data) => storage
            .merge_document(PROFILE_COLLECTION, &user.id, data)
            .await
            .map(|_| ()),
        Err(e) => Err(e.into()),
    };
    if let Err(e) = written {
        warn!("Failed to write admin profile record: {}", e);
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存与身份服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    // 重复安装时返回 Err，可忽略
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    register_builtin_plugins();
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    let identity: Arc<dyn IdentityProvider> = Arc::new(StorageIdentityProvider::new(
        storage.clone(),
        cache.clone(),
        Arc::new(LogMailer),
        IdentitySettings::from(AppConfig::get()),
    ));

    Ok(StartupContext {
        storage,
        cache,
        identity,
    })
}
