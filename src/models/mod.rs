//! 数据模型定义
//!
//! 请求、响应与业务实体，与 `entity` 中的数据库模型分离。

pub mod achievements;
pub mod assignments;
pub mod auth;
pub mod class_members;
pub mod classes;
pub mod common;
pub mod materials;
pub mod users;

pub use common::{ApiResponse, ErrorCode};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
