//! Equipment Domain
//!
//! This module provides a complete domain implementation for managing an
//! equipment stock using MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules: uniqueness, serial prefix, stock bounds
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_equipment::{
//!     handlers,
//!     mongodb::MongoEquipmentRepository,
//!     service::EquipmentService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! let repository = MongoEquipmentRepository::new(&db);
//! let service = EquipmentService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{EquipmentError, EquipmentResult};
pub use handlers::ApiDoc;
pub use models::{CreateEquipment, Equipment, EquipmentCategory, QuantityChange};
pub use self::mongodb::MongoEquipmentRepository;
pub use repository::EquipmentRepository;
pub use service::EquipmentService;
