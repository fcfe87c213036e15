use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Equipment category
///
/// Closed set of equipment kinds. Each category carries a human label and,
/// for catalogued product lines, the article-number prefix every serial
/// number of that category must start with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentCategory {
    /// Submersible motor pump
    MotorPump,
    /// Submersible mixer
    SubmersibleMixer,
    /// Aeration unit
    Aerator,
    /// Dosing pump
    DosingPump,
    /// Control and monitoring panel
    ControlPanel,
    /// Spare parts and accessories
    Accessory,
}

impl EquipmentCategory {
    /// Human-readable label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Self::MotorPump => "Motor pump",
            Self::SubmersibleMixer => "Submersible mixer",
            Self::Aerator => "Aerator",
            Self::DosingPump => "Dosing pump",
            Self::ControlPanel => "Control panel",
            Self::Accessory => "Accessory",
        }
    }

    /// Article-number prefix required of serial numbers in this category.
    ///
    /// `None` for categories without a catalogued number range
    /// (control panels and accessories carry vendor-assigned serials).
    pub fn required_prefix(&self) -> Option<&'static str> {
        match self {
            Self::MotorPump => Some("14015"),
            Self::SubmersibleMixer => Some("14016"),
            Self::Aerator => Some("14018"),
            Self::DosingPump => Some("14020"),
            Self::ControlPanel | Self::Accessory => None,
        }
    }
}

/// Equipment entity - represents a stocked equipment line in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Equipment {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Unique serial (article) number
    pub serial_number: String,
    /// Manufacturer brand
    pub brand: String,
    /// Model designation
    pub model: String,
    /// Equipment category
    pub category: EquipmentCategory,
    /// Current stock quantity
    pub quantity: i32,
    /// Maximum stock capacity; `quantity` never exceeds this
    pub max_capacity: i32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for registering a new equipment line
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    /// Serial (article) number; unique across all equipment
    #[validate(length(min = 9, max = 9))]
    pub serial_number: String,
    #[validate(length(min = 3, max = 200))]
    pub brand: String,
    #[validate(length(min = 3, max = 200))]
    pub model: String,
    pub category: EquipmentCategory,
    /// Initial stock quantity
    #[validate(range(min = 0))]
    #[serde(default)]
    pub quantity: i32,
    /// Maximum stock capacity
    #[validate(range(min = 1))]
    pub max_capacity: i32,
}

/// Request body for the stock increment/decrement endpoints
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct QuantityChange {
    /// Number of units to add or remove
    #[validate(range(min = 1))]
    pub quantity: i32,
}

impl Equipment {
    /// Create a new equipment record from a CreateEquipment DTO
    pub fn new(input: CreateEquipment) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            serial_number: input.serial_number,
            brand: input.brand,
            model: input.model,
            category: input.category,
            quantity: input.quantity,
            max_capacity: input.max_capacity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Remaining room before the stock hits its capacity
    pub fn available_capacity(&self) -> i32 {
        self.max_capacity - self.quantity
    }
}
