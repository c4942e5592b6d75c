//! 应用配置
//!
//! 按顺序叠加 `config.toml`、`config.{APP_ENV}.toml` 与 `CAMPUS_*` 环境变量，
//! 所有段落都有默认值，没有配置文件时也能启动。

mod r#impl;
mod structs;

pub use structs::*;
