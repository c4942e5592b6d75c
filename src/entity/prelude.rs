//! 预导入模块，方便使用

pub use super::documents::{
    ActiveModel as DocumentActiveModel, Entity as Documents, Model as DocumentModel,
};
pub use super::files::{ActiveModel as FileActiveModel, Entity as Files, Model as FileModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
