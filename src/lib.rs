//! Campus Hub - 校园管理应用后端
//!
//! 基于 Actix Web 构建，为移动端提供会话、导航与六个实体集合（学生、教师、课程、资源、活动、项目）的接口。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `collections`: 通用实体集合（列表、检索、表单、删除确认）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `identity`: 身份提供方（账户、第三方登录、密码重置）
//! - `middlewares`: 认证与限流中间件
//! - `models`: 数据模型定义
//! - `navigation`: 认证流程与主界面标签页
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: HTTP 处理层
//! - `session`: 会话门面
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod collections;
pub mod config;
pub mod entity;
pub mod errors;
pub mod identity;
pub mod middlewares;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod session;
pub mod storage;
pub mod utils;
