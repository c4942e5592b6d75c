pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod files;
pub mod navigation;
pub mod users;

use std::sync::Arc;

use actix_web::{HttpRequest, Result as ActixResult, web};

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use documents::DocumentService;
pub use files::FileService;
pub use navigation::NavigationService;
pub use users::UserService;

/// 从 app_data 中取出共享组件
pub(crate) fn shared<T: ?Sized + 'static>(
    request: &HttpRequest,
    name: &str,
) -> ActixResult<Arc<T>> {
    request
        .app_data::<web::Data<Arc<T>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            tracing::error!("{} not found in app data", name);
            actix_web::error::ErrorInternalServerError(format!("{name} is not configured"))
        })
}
