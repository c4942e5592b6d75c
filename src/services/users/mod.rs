use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{error, info};

use crate::collections::{CollectionSchema, CollectionService};
use crate::errors::CampusError;
use crate::identity::IdentityProvider;
use crate::models::documents::requests::CollectionListQuery;
use crate::models::users::entities::{User, UserProfileRecord};
use crate::models::users::requests::NewUserRequest;
use crate::models::users::responses::{UserDirectoryEntry, UserListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

use super::documents::document_failure;

/// 用户目录：列表检索与管理员建号
///
/// 详情与删除走通用的集合处理。
pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
    identity: Option<Arc<dyn IdentityProvider>>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            identity: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::shared::<dyn Storage>(request, "Storage"),
        }
    }

    pub(crate) fn get_identity(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<Arc<dyn IdentityProvider>> {
        match &self.identity {
            Some(identity) => Ok(identity.clone()),
            None => super::shared::<dyn IdentityProvider>(request, "Identity provider"),
        }
    }

    // 用户列表，按姓名或邮箱检索
    pub async fn list_users(
        &self,
        request: &HttpRequest,
        query: CollectionListQuery,
    ) -> ActixResult<HttpResponse> {
        let directory = CollectionService::<UserProfileRecord>::new(self.get_storage(request)?);

        match directory.list(query.search.as_deref()).await {
            Ok(documents) => {
                let items: Vec<UserDirectoryEntry> =
                    documents.into_iter().map(UserDirectoryEntry::from).collect();
                let total = items.len();
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    UserListResponse { items, total },
                    "Liste récupérée",
                )))
            }
            Err(e) => Ok(document_failure(
                &e,
                ErrorCode::DocumentLoadFailed,
                UserProfileRecord::messages().list_failed,
            )),
        }
    }

    // 新建账户与资料记录，角色由管理员指定
    pub async fn create_user(
        &self,
        request: &HttpRequest,
        form: NewUserRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(message) = form.validate() {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, message)));
        }

        let identity = self.get_identity(request)?;
        match identity
            .create_account_with_role(
                form.email.trim(),
                &form.password,
                form.display_name.trim(),
                form.role,
            )
            .await
        {
            Ok(user) => {
                info!("User {} created with role {}", user.id, user.role);
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    directory_entry(&user),
                    UserProfileRecord::messages().created,
                )))
            }
            Err(e) => Ok(create_failure(&e)),
        }
    }
}

fn directory_entry(user: &User) -> UserDirectoryEntry {
    UserDirectoryEntry {
        id: user.id.clone(),
        display_name: user.label().to_string(),
        email: user.email.clone(),
        role: user.role,
        role_label: user.role.label().to_string(),
        created_at: user.created_at,
    }
}

fn create_failure(err: &CampusError) -> HttpResponse {
    match err {
        CampusError::EmailAlreadyInUse(_) => HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::EmailAlreadyExists,
                "Cette adresse email est déjà utilisée",
            ),
        ),
        CampusError::InvalidEmail(_) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::EmailInvalid, "Adresse email invalide"),
        ),
        CampusError::WeakPassword(_) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(
                ErrorCode::PasswordInvalid,
                "Le mot de passe est trop faible",
            ),
        ),
        _ => {
            error!("Failed to create user: {}", err);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                UserProfileRecord::messages().save_failed,
            ))
        }
    }
}
