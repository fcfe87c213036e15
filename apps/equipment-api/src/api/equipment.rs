//! Equipment API routes

use axum::Router;
use domain_equipment::{handlers, EquipmentService, MongoEquipmentRepository};

use crate::state::AppState;

/// Create the equipment router
pub fn router(state: &AppState) -> Router {
    let repository = MongoEquipmentRepository::new(&state.db);
    let service = EquipmentService::new(repository);
    handlers::router(service)
}

/// Initialize equipment indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoEquipmentRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
