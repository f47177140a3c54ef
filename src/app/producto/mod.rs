pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub use model::{Producto, ProductoPayload};
pub use repository::{
    InMemoryProductoRepository, PgProductoRepository, ProductoRepository, RepositoryError,
};
pub use service::ProductoService;
