//! 会话门面
//!
//! 持有当前会话、加载标志与最近一次失败的提示语。每个操作只做一次身份提供方调用，
//! 失败时状态保持不变并记录法语提示；没有重试，也没有令牌刷新。

pub mod messages;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

pub use messages::{SessionOp, user_message};

use crate::errors::{CampusError, Result};
use crate::identity::{IdentityProvider, ProviderKind};
use crate::models::users::entities::User;

/// 当前会话，只有两种状态
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "user", rename_all = "snake_case")]
pub enum SessionState {
    Unauthenticated,
    Authenticated(User),
}

impl SessionState {
    pub fn from_user(user: Option<User>) -> Self {
        match user {
            Some(user) => SessionState::Authenticated(user),
            None => SessionState::Unauthenticated,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

pub struct SessionFacade {
    provider: Arc<dyn IdentityProvider>,
    state: SessionState,
    loading: bool,
    error: Option<String>,
}

impl SessionFacade {
    /// 初始会话尚未解析，`loading` 为 true
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            state: SessionState::Unauthenticated,
            loading: true,
            error: None,
        }
    }

    /// 以已知的会话创建（HTTP 请求中由访问令牌解析得到）
    pub fn restore(provider: Arc<dyn IdentityProvider>, user: Option<User>) -> Self {
        let mut facade = Self::new(provider);
        facade.resolve_initial(user);
        facade
    }

    pub fn resolve_initial(&mut self, user: Option<User>) {
        self.state = SessionState::from_user(user);
        self.loading = false;
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.user()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn settle<T>(&mut self, op: SessionOp, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            warn!("Session operation {:?} failed: {}", op, err);
            self.error = Some(user_message(op, err).to_string());
        }
        result
    }

    fn active_user_id(&self) -> Result<String> {
        self.state
            .user()
            .map(|user| user.id.clone())
            .ok_or_else(|| CampusError::authentication("No active session"))
    }

    fn authenticate(&mut self, user: User) -> User {
        debug!("Session authenticated as {}", user.id);
        self.state = SessionState::Authenticated(user.clone());
        user
    }

    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<User> {
        self.error = None;
        let result = self
            .provider
            .create_account(email, password, display_name)
            .await;
        let user = self.settle(SessionOp::Register, result)?;
        Ok(self.authenticate(user))
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<User> {
        self.error = None;
        let result = self.provider.sign_in(email, password).await;
        let user = self.settle(SessionOp::Login, result)?;
        Ok(self.authenticate(user))
    }

    pub async fn login_with_provider(&mut self, kind: ProviderKind, id_token: &str) -> Result<User> {
        self.error = None;
        let result = self.provider.sign_in_with_provider(kind, id_token).await;
        let user = self.settle(SessionOp::LoginWithProvider(kind), result)?;
        Ok(self.authenticate(user))
    }

    pub async fn reset_password(&mut self, email: &str) -> Result<()> {
        self.error = None;
        let result = self.provider.send_password_reset(email).await;
        self.settle(SessionOp::ResetPassword, result)
    }

    pub async fn confirm_password_reset(&mut self, code: &str, new_password: &str) -> Result<()> {
        self.error = None;
        let result = self
            .provider
            .confirm_password_reset(code, new_password)
            .await;
        self.settle(SessionOp::ConfirmPasswordReset, result)
    }

    pub async fn update_profile(
        &mut self,
        display_name: &str,
        photo_url: Option<&str>,
    ) -> Result<User> {
        self.error = None;
        let user_id = self.active_user_id();
        let user_id = self.settle(SessionOp::UpdateProfile, user_id)?;
        let result = self
            .provider
            .update_display_name(&user_id, display_name, photo_url)
            .await;
        let user = self.settle(SessionOp::UpdateProfile, result)?;
        Ok(self.authenticate(user))
    }

    pub async fn update_email(&mut self, email: &str) -> Result<User> {
        self.error = None;
        let user_id = self.active_user_id();
        let user_id = self.settle(SessionOp::UpdateEmail, user_id)?;
        let result = self.provider.update_email(&user_id, email).await;
        let user = self.settle(SessionOp::UpdateEmail, result)?;
        Ok(self.authenticate(user))
    }

    /// 先验证当前密码，再设置新密码；任何一步失败都直接返回
    pub async fn update_password(&mut self, current: &str, new_password: &str) -> Result<()> {
        self.error = None;
        let user_id = self.active_user_id();
        let user_id = self.settle(SessionOp::UpdatePassword, user_id)?;

        let result = self.provider.reauthenticate(&user_id, current).await;
        self.settle(SessionOp::UpdatePassword, result)?;

        let result = self.provider.update_password(&user_id, new_password).await;
        self.settle(SessionOp::UpdatePassword, result)
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.error = None;
        let Some(user_id) = self.state.user().map(|user| user.id.clone()) else {
            return Ok(());
        };
        let result = self.provider.sign_out(&user_id).await;
        self.settle(SessionOp::Logout, result)?;
        self.state = SessionState::Unauthenticated;
        Ok(())
    }
}
