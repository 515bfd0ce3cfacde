//! Products Domain
//!
//! Catalog of named, priced products.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← REST endpoints, status code mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, name uniqueness, reader/writer lock
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Store    │  ← ProductStore trait: Postgres or in-memory
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, NewProduct, ProductView
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, InMemoryProductStore, ProductService};
//!
//! let service = ProductService::new(InMemoryProductStore::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use models::{NewProduct, Product, ProductView};
pub use postgres::PgProductStore;
pub use repository::{InMemoryProductStore, ProductStore};
pub use service::ProductService;
