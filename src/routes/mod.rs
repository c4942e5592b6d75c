pub mod auth;

pub mod collections;

pub mod dashboard;

pub mod files;

pub mod navigation;

pub mod users;

pub use auth::configure_auth_routes;
pub use collections::configure_collections_routes;
pub use dashboard::configure_dashboard_routes;
pub use files::configure_file_routes;
pub use navigation::configure_navigation_routes;
pub use users::configure_users_routes;
