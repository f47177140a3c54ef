//! # 产品管理服务
//!
//! 单一 "producto" 资源的 CRUD HTTP 服务，分层结构：
//! - `app`: 业务模块（模型、仓储、服务、处理器）
//! - `core`: 错误处理、请求提取器、中间件
//! - `infrastructure`: 配置、数据库、日志

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::{router, AppState};
pub use app::producto::{
    InMemoryProductoRepository, PgProductoRepository, Producto, ProductoPayload,
    ProductoRepository, ProductoService, RepositoryError,
};
pub use crate::core::error::CoreError;
