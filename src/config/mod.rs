//! 配置管理
//!
//! 配置来源优先级（从低到高）：内置默认值 → `config.toml` → `config.{APP_ENV}.toml`
//! → `CLASSHUB_*` 环境变量 → 常用环境变量覆盖。

mod r#impl;
mod structs;

pub use r#impl::DEFAULT_JWT_SECRET;
pub use structs::*;
