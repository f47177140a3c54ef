//! 产品数据模型

use std::borrow::Cow;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::error::CoreError;

pub const MENSAJE_NOMBRE_VACIO: &str = "El nombre no puede estar vacío";
pub const MENSAJE_PRECIO_OBLIGATORIO: &str = "El precio es obligatorio";
pub const MENSAJE_PRECIO_POSITIVO: &str = "El precio debe ser mayor que 0";

/// 持久化的产品记录，对应 `productos` 表
///
/// `id` 只有在尚未保存时为 `None`；仓储返回的记录总是带有 id。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    pub id: Option<i32>,
    pub nombre: String,
    pub precio: f64,
    /// 创建时写入一次，之后不可修改
    pub fecha_creacion: NaiveDateTime,
}

/// 创建/更新请求体，`id` 与 `fechaCreacion` 即使提供也会被忽略
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProductoPayload {
    #[validate(
        required(message = "El nombre no puede estar vacío"),
        custom(function = "validar_no_vacio")
    )]
    pub nombre: Option<String>,

    #[validate(
        required(message = "El precio es obligatorio"),
        range(exclusive_min = 0.0, message = "El precio debe ser mayor que 0")
    )]
    pub precio: Option<f64>,
}

impl ProductoPayload {
    pub fn new(nombre: impl Into<String>, precio: f64) -> Self {
        Self {
            nombre: Some(nombre.into()),
            precio: Some(precio),
        }
    }

    /// 取出已校验的字段；缺失字段视为请求错误
    pub fn into_parts(self) -> Result<(String, f64), CoreError> {
        let nombre = self
            .nombre
            .ok_or_else(|| CoreError::BadRequest(MENSAJE_NOMBRE_VACIO.to_string()))?;
        let precio = self
            .precio
            .ok_or_else(|| CoreError::BadRequest(MENSAJE_PRECIO_OBLIGATORIO.to_string()))?;
        Ok((nombre, precio))
    }
}

/// 空字符串或仅含空白字符均视为空
fn validar_no_vacio(nombre: &str) -> Result<(), ValidationError> {
    if nombre.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some(Cow::Borrowed(MENSAJE_NOMBRE_VACIO));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(nombre: Option<&str>, precio: Option<f64>) -> ProductoPayload {
        ProductoPayload {
            nombre: nombre.map(|n| n.to_string()),
            precio,
        }
    }

    fn field_message(payload: &ProductoPayload, field: &str) -> Option<String> {
        let errors = payload.validate().err()?;
        let field_errors = errors.field_errors();
        field_errors
            .get(field)
            .and_then(|errs| errs.first())
            .and_then(|e| e.message.as_ref())
            .map(|m| m.to_string())
    }

    #[test]
    fn test_valid_payload() {
        assert!(payload(Some("Widget"), Some(9.99)).validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let p = payload(Some(""), Some(9.99));
        assert_eq!(field_message(&p, "nombre").as_deref(), Some(MENSAJE_NOMBRE_VACIO));
    }

    #[test]
    fn test_blank_name_rejected() {
        let p = payload(Some("   "), Some(9.99));
        assert_eq!(field_message(&p, "nombre").as_deref(), Some(MENSAJE_NOMBRE_VACIO));
    }

    #[test]
    fn test_missing_name_rejected() {
        let p = payload(None, Some(9.99));
        assert_eq!(field_message(&p, "nombre").as_deref(), Some(MENSAJE_NOMBRE_VACIO));
    }

    #[test]
    fn test_missing_price_rejected() {
        let p = payload(Some("Widget"), None);
        assert_eq!(field_message(&p, "precio").as_deref(), Some(MENSAJE_PRECIO_OBLIGATORIO));
    }

    #[test]
    fn test_zero_and_negative_price_rejected() {
        for precio in [0.0, -1.0, -0.01] {
            let p = payload(Some("Widget"), Some(precio));
            assert_eq!(
                field_message(&p, "precio").as_deref(),
                Some(MENSAJE_PRECIO_POSITIVO),
                "precio {}",
                precio
            );
        }
    }

    #[test]
    fn test_payload_ignores_id_and_timestamp() {
        let body = r#"{"id": 42, "nombre": "Widget", "precio": 1.5, "fechaCreacion": "2020-01-01T00:00:00"}"#;
        let p: ProductoPayload = serde_json::from_str(body).unwrap();
        assert_eq!(p.nombre.as_deref(), Some("Widget"));
        assert_eq!(p.precio, Some(1.5));
    }

    #[test]
    fn test_producto_serializes_with_wire_names() {
        let producto = Producto {
            id: Some(1),
            nombre: "Widget".to_string(),
            precio: 9.99,
            fecha_creacion: NaiveDateTime::parse_from_str("2026-10-14 10:11:12", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        };
        let json = serde_json::to_value(&producto).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["nombre"], "Widget");
        assert_eq!(json["precio"], 9.99);
        assert_eq!(json["fechaCreacion"], "2026-10-14T10:11:12");
    }

    #[test]
    fn test_into_parts() {
        let (nombre, precio) = ProductoPayload::new("Widget", 9.99).into_parts().unwrap();
        assert_eq!(nombre, "Widget");
        assert_eq!(precio, 9.99);
        assert!(payload(None, Some(1.0)).into_parts().is_err());
    }
}
