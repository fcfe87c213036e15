//! MongoDB implementation of EquipmentRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Bson, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::EquipmentResult;
use crate::models::{CreateEquipment, Equipment};
use crate::repository::EquipmentRepository;

/// MongoDB implementation of the EquipmentRepository
pub struct MongoEquipmentRepository {
    collection: Collection<Equipment>,
}

impl MongoEquipmentRepository {
    /// Create a new MongoEquipmentRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Equipment>("equipment");
        Self { collection }
    }

    /// Create a new MongoEquipmentRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Equipment>(collection_name);
        Self { collection }
    }

    /// Initialize indexes
    ///
    /// The unique serial-number index backs the uniqueness invariant even
    /// when two registrations race past the service-level duplicate check.
    pub async fn init_indexes(&self) -> EquipmentResult<()> {
        let indexes = vec![IndexModel::builder()
            .keys(doc! { "serial_number": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_serial_number_unique".to_string())
                    .build(),
            )
            .build()];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Equipment indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Equipment> {
        &self.collection
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }

    /// Filter matching the record iff `quantity + amount <= max_capacity`
    fn bounded_increment_filter(id: Uuid, amount: i32) -> Document {
        doc! {
            "_id": to_bson(&id).unwrap_or(Bson::Null),
            "$expr": { "$lte": [ { "$add": ["$quantity", amount] }, "$max_capacity" ] }
        }
    }

    /// Filter matching the record iff `quantity - amount >= 0`
    fn bounded_decrement_filter(id: Uuid, amount: i32) -> Document {
        doc! {
            "_id": to_bson(&id).unwrap_or(Bson::Null),
            "$expr": { "$gte": [ { "$subtract": ["$quantity", amount] }, 0 ] }
        }
    }

    fn quantity_update(amount: i32) -> Document {
        doc! {
            "$inc": { "quantity": amount },
            "$set": { "updated_at": chrono::Utc::now().to_rfc3339() }
        }
    }

    /// Apply a bounded quantity change as a single conditional update.
    ///
    /// The filter carries the bound, so check and write are one round-trip;
    /// `None` means no record matched (missing id or refused bound).
    async fn apply_quantity_change(
        &self,
        filter: Document,
        amount: i32,
    ) -> EquipmentResult<Option<Equipment>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(filter, Self::quantity_update(amount))
            .with_options(options)
            .await?;

        Ok(updated)
    }
}

#[async_trait]
impl EquipmentRepository for MongoEquipmentRepository {
    #[instrument(skip(self, input), fields(serial_number = %input.serial_number))]
    async fn create(&self, input: CreateEquipment) -> EquipmentResult<Equipment> {
        let equipment = Equipment::new(input);

        self.collection.insert_one(&equipment).await?;

        tracing::info!(equipment_id = %equipment.id, "Equipment registered successfully");
        Ok(equipment)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> EquipmentResult<Option<Equipment>> {
        let equipment = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(equipment)
    }

    #[instrument(skip(self))]
    async fn get_by_serial(&self, serial_number: &str) -> EquipmentResult<Option<Equipment>> {
        let filter = doc! { "serial_number": serial_number };
        let equipment = self.collection.find_one(filter).await?;
        Ok(equipment)
    }

    #[instrument(skip(self))]
    async fn exists_by_serial(&self, serial_number: &str) -> EquipmentResult<bool> {
        let filter = doc! { "serial_number": serial_number };
        let count = self.collection.count_documents(filter).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> EquipmentResult<Vec<Equipment>> {
        use futures_util::TryStreamExt;

        let cursor = self.collection.find(doc! {}).await?;
        let equipment: Vec<Equipment> = cursor.try_collect().await?;

        Ok(equipment)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> EquipmentResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count > 0 {
            tracing::info!(equipment_id = %id, "Equipment deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn increment_quantity(
        &self,
        id: Uuid,
        amount: i32,
    ) -> EquipmentResult<Option<Equipment>> {
        let updated = self
            .apply_quantity_change(Self::bounded_increment_filter(id, amount), amount)
            .await?;

        if updated.is_some() {
            tracing::info!(equipment_id = %id, amount, "Stock incremented");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn decrement_quantity(
        &self,
        id: Uuid,
        amount: i32,
    ) -> EquipmentResult<Option<Equipment>> {
        let updated = self
            .apply_quantity_change(Self::bounded_decrement_filter(id, amount), -amount)
            .await?;

        if updated.is_some() {
            tracing::info!(equipment_id = %id, amount, "Stock decremented");
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_filter_targets_primary_key() {
        let filter = MongoEquipmentRepository::id_filter(Uuid::now_v7());
        assert!(filter.contains_key("_id"));
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_increment_filter_carries_capacity_bound() {
        let filter = MongoEquipmentRepository::bounded_increment_filter(Uuid::now_v7(), 10);
        assert!(filter.contains_key("_id"));
        assert!(filter.contains_key("$expr"));
    }

    #[test]
    fn test_decrement_filter_carries_zero_bound() {
        let filter = MongoEquipmentRepository::bounded_decrement_filter(Uuid::now_v7(), 10);
        assert!(filter.contains_key("$expr"));
    }

    #[test]
    fn test_quantity_update_increments_and_touches_timestamp() {
        let update = MongoEquipmentRepository::quantity_update(5);
        assert!(update.contains_key("$inc"));
        assert!(update.contains_key("$set"));
    }
}
