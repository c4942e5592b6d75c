use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::cache::ObjectCache;
use crate::middlewares::require_jwt::authenticate_token;
use crate::models::ApiResponse;
use crate::navigation::{Flow, NavigationShell};
use crate::session::SessionState;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub session: SessionState,
    pub flow: Flow,
}

pub struct NavigationService {
    storage: Option<Arc<dyn Storage>>,
    cache: Option<Arc<dyn ObjectCache>>,
}

impl NavigationService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            cache: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::shared::<dyn Storage>(request, "Storage"),
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> ActixResult<Arc<dyn ObjectCache>> {
        match &self.cache {
            Some(cache) => Ok(cache.clone()),
            None => super::shared::<dyn ObjectCache>(request, "Cache"),
        }
    }

    /// 根据可选的访问令牌决定展示认证流程还是主界面
    ///
    /// 令牌缺失或无效都按未登录处理，不返回 401。
    pub async fn resolve(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let user = match JwtUtils::extract_bearer_token(request) {
            Some(token) => {
                let storage = self.get_storage(request)?;
                let cache = self.get_cache(request)?;
                match authenticate_token(&token, storage.as_ref(), cache.as_ref()).await {
                    Ok(user) => Some(user),
                    Err(e) => {
                        debug!("Navigation falls back to the auth flow: {}", e);
                        None
                    }
                }
            }
            None => None,
        };

        let session = SessionState::from_user(user);
        let flow = NavigationShell::resolve(&session);
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            NavigationResponse { session, flow },
            "",
        )))
    }
}
