//! 产品仓储：持久化网关接口及其 PostgreSQL / 内存实现

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use tokio::sync::RwLock;

use super::model::Producto;

/// 仓储错误类型
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("产品 {0} 不存在")]
    NotFound(i32),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// 持久化网关
#[async_trait]
pub trait ProductoRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Producto>>;

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Producto>>;

    /// `id` 为 `None` 时插入并由存储分配 id；否则只更新 `nombre` 和 `precio`，
    /// `fecha_creacion` 保持插入时的值。
    async fn save(&self, producto: Producto) -> RepositoryResult<Producto>;

    async fn exists_by_id(&self, id: i32) -> RepositoryResult<bool>;

    /// id 不存在时返回 `RepositoryError::NotFound`
    async fn delete_by_id(&self, id: i32) -> RepositoryResult<()>;
}

const SELECT_COLUMNS: &str = "id, nombre, precio, fecha_creacion";

/// 基于 sqlx 连接池的实现
#[derive(Clone)]
pub struct PgProductoRepository {
    pool: PgPool,
}

impl PgProductoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductoRepository for PgProductoRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Producto>> {
        let productos = sqlx::query_as::<_, Producto>(&format!(
            "SELECT {} FROM productos ORDER BY id",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(productos)
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Producto>> {
        let producto = sqlx::query_as::<_, Producto>(&format!(
            "SELECT {} FROM productos WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(producto)
    }

    async fn save(&self, producto: Producto) -> RepositoryResult<Producto> {
        match producto.id {
            None => {
                let saved = sqlx::query_as::<_, Producto>(&format!(
                    "INSERT INTO productos (nombre, precio, fecha_creacion) VALUES ($1, $2, $3) RETURNING {}",
                    SELECT_COLUMNS
                ))
                .bind(&producto.nombre)
                .bind(producto.precio)
                .bind(producto.fecha_creacion)
                .fetch_one(&self.pool)
                .await?;

                Ok(saved)
            }
            Some(id) => {
                // fecha_creacion 不参与更新
                let updated = sqlx::query_as::<_, Producto>(&format!(
                    "UPDATE productos SET nombre = $1, precio = $2 WHERE id = $3 RETURNING {}",
                    SELECT_COLUMNS
                ))
                .bind(&producto.nombre)
                .bind(producto.precio)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

                updated.ok_or(RepositoryError::NotFound(id))
            }
        }
    }

    async fn exists_by_id(&self, id: i32) -> RepositoryResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM productos WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn delete_by_id(&self, id: i32) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM productos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        Ok(())
    }
}

#[derive(Default)]
struct MemoryTable {
    last_id: i32,
    rows: BTreeMap<i32, Producto>,
}

/// 内存实现，id 从 1 开始递增，删除后不复用
#[derive(Clone, Default)]
pub struct InMemoryProductoRepository {
    table: Arc<RwLock<MemoryTable>>,
}

impl InMemoryProductoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductoRepository for InMemoryProductoRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Producto>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Producto>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn save(&self, mut producto: Producto) -> RepositoryResult<Producto> {
        let mut table = self.table.write().await;

        match producto.id {
            None => {
                table.last_id += 1;
                let id = table.last_id;
                producto.id = Some(id);
                table.rows.insert(id, producto.clone());
                Ok(producto)
            }
            Some(id) => {
                let stored = table
                    .rows
                    .get_mut(&id)
                    .ok_or(RepositoryError::NotFound(id))?;
                stored.nombre = producto.nombre;
                stored.precio = producto.precio;
                Ok(stored.clone())
            }
        }
    }

    async fn exists_by_id(&self, id: i32) -> RepositoryResult<bool> {
        let table = self.table.read().await;
        Ok(table.rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i32) -> RepositoryResult<()> {
        let mut table = self.table.write().await;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }
}
