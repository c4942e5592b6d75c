//! 实体集合的描述
//!
//! 实体结构定义在 `models` 中，这里为它们实现 [`CollectionSchema`](super::CollectionSchema)。
//! 除六个实体集合外，`users` 资料记录也在这里描述。

mod courses;
mod events;
mod projects;
mod resources;
mod students;
mod teachers;
mod users;

pub use resources::UNKNOWN_UPLOADER;
pub use users::FALLBACK_USER_NAME;
