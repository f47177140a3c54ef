//! 产品处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};

use super::{
    model::{Producto, ProductoPayload},
    service::PRODUCTO_NO_ENCONTRADO,
};
use crate::app::AppState;
use crate::core::{error::CoreError, extract::ValidatedJson};

pub const PRODUCTO_ELIMINADO: &str = "Producto eliminado correctamente";

pub const BASE_PATH: &str = "/api/productos";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(BASE_PATH, get(listar_productos).post(agregar_producto))
        .route(
            "/api/productos/:id",
            get(obtener_producto)
                .put(actualizar_producto)
                .delete(eliminar_producto),
        )
}

pub async fn listar_productos(
    State(state): State<AppState>,
) -> Result<Json<Vec<Producto>>, CoreError> {
    let productos = state.producto_service.listar_productos().await?;
    Ok(Json(productos))
}

pub async fn obtener_producto(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Producto>, CoreError> {
    let producto = state.producto_service.obtener_producto(id).await?;
    Ok(Json(producto))
}

pub async fn agregar_producto(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ProductoPayload>,
) -> Result<Json<Producto>, CoreError> {
    let producto = state.producto_service.agregar_producto(payload).await?;
    Ok(Json(producto))
}

pub async fn actualizar_producto(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<ProductoPayload>,
) -> Result<Json<Producto>, CoreError> {
    state
        .producto_service
        .actualizar_producto(id, payload)
        .await?
        .map(Json)
        .ok_or_else(|| CoreError::NotFound(PRODUCTO_NO_ENCONTRADO.to_string()))
}

/// 删除结果以纯文本返回
pub async fn eliminar_producto(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, CoreError> {
    match state.producto_service.eliminar_producto(id).await {
        Ok(()) => Ok((StatusCode::OK, PRODUCTO_ELIMINADO).into_response()),
        Err(CoreError::NotFound(_)) => {
            Ok((StatusCode::NOT_FOUND, PRODUCTO_NO_ENCONTRADO).into_response())
        }
        Err(e) => Err(e),
    }
}
