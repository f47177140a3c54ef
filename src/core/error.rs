//! 核心错误处理模块

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::app::producto::RepositoryError;

/// 核心错误类型
#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    /// 字段名 -> 错误信息
    Validation(BTreeMap<String, String>),
    NotFound(String),
    InternalServerError(String),
}

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) | CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::BadRequest(msg) => write!(f, "请求无效: {}", msg),
            CoreError::Validation(fields) => write!(f, "数据校验失败: {:?}", fields),
            CoreError::NotFound(msg) => write!(f, "资源不存在: {}", msg),
            CoreError::InternalServerError(msg) => write!(f, "服务器内部错误: {}", msg),
        }
    }
}

impl std::error::Error for CoreError {}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_code, user_message, fields) = match self {
            CoreError::BadRequest(msg) => ("BAD_REQUEST", msg, BTreeMap::new()),
            CoreError::Validation(fields) => (
                "VALIDATION_ERROR",
                "Los datos del producto no son válidos".to_string(),
                fields,
            ),
            CoreError::NotFound(msg) => ("NOT_FOUND", msg, BTreeMap::new()),
            CoreError::InternalServerError(msg) => ("INTERNAL_SERVER_ERROR", msg, BTreeMap::new()),
        };

        let error_response = ErrorResponse {
            error: error_code.to_string(),
            message: user_message,
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            fields,
        };

        (status, axum::Json(error_response)).into_response()
    }
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => CoreError::NotFound("Producto no encontrado".to_string()),
            RepositoryError::Database(e) => {
                error!("数据库错误: {}", e);
                CoreError::InternalServerError("Error interno del servidor".to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(err: validator::ValidationErrors) -> Self {
        let fields = err
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let message = errors
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "Valor no válido".to_string());
                (field.to_string(), message)
            })
            .collect();

        CoreError::Validation(fields)
    }
}
