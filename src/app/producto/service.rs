//! 产品业务服务

use std::sync::Arc;

use chrono::{Local, SubsecRound};
use tracing::info;

use super::model::{Producto, ProductoPayload};
use super::repository::ProductoRepository;
use crate::core::error::CoreError;

pub const PRODUCTO_NO_ENCONTRADO: &str = "Producto no encontrado";

#[derive(Clone)]
pub struct ProductoService {
    repository: Arc<dyn ProductoRepository>,
}

impl ProductoService {
    pub fn new(repository: Arc<dyn ProductoRepository>) -> Self {
        Self { repository }
    }

    pub async fn listar_productos(&self) -> Result<Vec<Producto>, CoreError> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn obtener_producto(&self, id: i32) -> Result<Producto, CoreError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(PRODUCTO_NO_ENCONTRADO.to_string()))
    }

    /// 调用方需先完成字段校验；id 由存储分配，创建时间在此写入
    pub async fn agregar_producto(&self, payload: ProductoPayload) -> Result<Producto, CoreError> {
        let (nombre, precio) = payload.into_parts()?;
        let producto = Producto {
            id: None,
            nombre,
            precio,
            // 与数据库 TIMESTAMP 精度一致（微秒）
            fecha_creacion: Local::now().naive_local().trunc_subsecs(6),
        };

        let saved = self.repository.save(producto).await?;
        info!("已创建产品: {} ({:?})", saved.nombre, saved.id);
        Ok(saved)
    }

    pub async fn eliminar_producto(&self, id: i32) -> Result<(), CoreError> {
        if !self.repository.exists_by_id(id).await? {
            return Err(CoreError::NotFound(PRODUCTO_NO_ENCONTRADO.to_string()));
        }

        self.repository.delete_by_id(id).await?;
        info!("已删除产品: {}", id);
        Ok(())
    }

    /// 产品不存在时返回 `Ok(None)` 而不是 NotFound
    pub async fn actualizar_producto(
        &self,
        id: i32,
        payload: ProductoPayload,
    ) -> Result<Option<Producto>, CoreError> {
        let Some(mut producto) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        let (nombre, precio) = payload.into_parts()?;
        producto.nombre = nombre;
        producto.precio = precio;

        let updated = self.repository.save(producto).await?;
        info!("已更新产品: {} ({})", updated.nombre, id);
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::producto::repository::InMemoryProductoRepository;

    fn service() -> ProductoService {
        ProductoService::new(Arc::new(InMemoryProductoRepository::new()))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let before = Local::now().naive_local().trunc_subsecs(6);

        let created = service
            .agregar_producto(ProductoPayload::new("Widget", 9.99))
            .await
            .unwrap();
        let id = created.id.unwrap();
        assert!(created.fecha_creacion >= before);
        assert!(created.fecha_creacion <= Local::now().naive_local());

        let fetched = service.obtener_producto(id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_missing_id_outcomes() {
        let service = service();
        assert!(matches!(service.obtener_producto(5).await, Err(CoreError::NotFound(_))));
        assert!(matches!(service.eliminar_producto(5).await, Err(CoreError::NotFound(_))));
        assert!(service
            .actualizar_producto(5, ProductoPayload::new("X", 1.0))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = service();
        let created = service
            .agregar_producto(ProductoPayload::new("Widget", 9.99))
            .await
            .unwrap();
        let id = created.id.unwrap();

        service.eliminar_producto(id).await.unwrap();
        assert!(matches!(service.eliminar_producto(id).await, Err(CoreError::NotFound(_))));
        assert!(matches!(service.eliminar_producto(id).await, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_preserves_id_and_timestamp() {
        let service = service();
        let created = service
            .agregar_producto(ProductoPayload::new("Widget", 9.99))
            .await
            .unwrap();
        let id = created.id.unwrap();

        let updated = service
            .actualizar_producto(id, ProductoPayload::new("Widget XL", 12.5))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.fecha_creacion, created.fecha_creacion);
        assert_eq!(updated.nombre, "Widget XL");
        assert_eq!(updated.precio, 12.5);
        assert_eq!(service.obtener_producto(id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_list_products() {
        let service = service();
        assert!(service.listar_productos().await.unwrap().is_empty());

        service.agregar_producto(ProductoPayload::new("A", 1.0)).await.unwrap();
        service.agregar_producto(ProductoPayload::new("B", 2.0)).await.unwrap();

        let nombres: Vec<String> = service
            .listar_productos()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.nombre)
            .collect();
        assert_eq!(nombres, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_create_without_fields_is_rejected() {
        let service = service();
        let result = service.agregar_producto(ProductoPayload::default()).await;
        assert!(matches!(result, Err(CoreError::BadRequest(_))));
        assert!(service.listar_productos().await.unwrap().is_empty());
    }
}
