use std::sync::Arc;

use gestion_productos::app::{self, producto::ProductoRepository, AppState};
use gestion_productos::infrastructure::{
    config::{load_config, StorageBackend},
    database::DatabaseManager,
    logger::Logger,
};
use gestion_productos::{InMemoryProductoRepository, PgProductoRepository, ProductoService};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = load_config()?;
    let _log_guard = Logger::init(&config.logging)?;

    match source {
        Some(path) => info!("从配置文件加载: {}", path),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let repository: Arc<dyn ProductoRepository> = match config.database.backend {
        StorageBackend::Postgres => {
            let db = DatabaseManager::new(&config.database).await.map_err(|e| {
                error!("数据库初始化失败: {}", e);
                e
            })?;
            db.ensure_schema().await?;
            Arc::new(PgProductoRepository::new(db.get_pool().clone()))
        }
        StorageBackend::Memory => {
            warn!("使用内存存储，重启后数据将丢失");
            Arc::new(InMemoryProductoRepository::new())
        }
    };

    let state = AppState::new(ProductoService::new(repository));
    let app = app::router(state, &config.http);

    let listener =
        TcpListener::bind((config.http.bind_address.as_str(), config.http.port)).await?;
    let addr = listener.local_addr()?;

    info!("🚀 产品管理服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /api/productos      - 获取所有产品");
    info!("   POST   /api/productos      - 创建产品");
    info!("   GET    /api/productos/:id  - 获取特定产品");
    info!("   PUT    /api/productos/:id  - 更新产品");
    info!("   DELETE /api/productos/:id  - 删除产品");
    info!("   GET    /health             - 健康检查");

    axum::serve(listener, app).await?;

    Ok(())
}
