use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::NavigationService;

static NAVIGATION_SERVICE: Lazy<NavigationService> = Lazy::new(NavigationService::new_lazy);

pub async fn resolve_navigation(request: HttpRequest) -> ActixResult<HttpResponse> {
    NAVIGATION_SERVICE.resolve(&request).await
}

// 配置路由，令牌可选
pub fn configure_navigation_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/navigation", web::get().to(resolve_navigation));
}
