use serde::{Deserialize, Serialize};
use std::fmt;

/// Field values keyed by field name. Used both for caller payloads and for
/// raw store rows; the descriptor decides which naming applies.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// The kind of record an operation targets.
///
/// Serialized as the tag the HTTP API uses (`customers`, `purchaseorders`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    #[serde(rename = "customers")]
    Customer,
    #[serde(rename = "items")]
    Item,
    #[serde(rename = "projects")]
    Project,
    #[serde(rename = "estimates")]
    Estimate,
    #[serde(rename = "purchaseorders")]
    PurchaseOrder,
    #[serde(rename = "projecttasks")]
    ProjectTask,
}

impl EntityType {
    /// Every entity type, in the order tags are listed to callers.
    pub const ALL: [EntityType; 6] = [
        EntityType::Customer,
        EntityType::Item,
        EntityType::Project,
        EntityType::Estimate,
        EntityType::PurchaseOrder,
        EntityType::ProjectTask,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            EntityType::Customer => "customers",
            EntityType::Item => "items",
            EntityType::Project => "projects",
            EntityType::Estimate => "estimates",
            EntityType::PurchaseOrder => "purchaseorders",
            EntityType::ProjectTask => "projecttasks",
        }
    }

    /// Human-readable singular name, used in envelope messages.
    pub fn label(self) -> &'static str {
        match self {
            EntityType::Customer => "Customer",
            EntityType::Item => "Item",
            EntityType::Project => "Project",
            EntityType::Estimate => "Estimate",
            EntityType::PurchaseOrder => "Purchase Order",
            EntityType::ProjectTask => "Project Task",
        }
    }

    /// Resolve a request tag. Tags are matched exactly.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Whether create/update/delete are offered for this type.
    ///
    /// Project tasks are served on the read side only.
    pub fn is_writable(self) -> bool {
        !matches!(self, EntityType::ProjectTask)
    }

    /// Tags accepted by read operations.
    pub fn readable_tags() -> Vec<&'static str> {
        Self::ALL.iter().map(|t| t.tag()).collect()
    }

    /// Tags accepted by create, update and delete.
    pub fn writable_tags() -> Vec<&'static str> {
        Self::ALL
            .iter()
            .filter(|t| t.is_writable())
            .map(|t| t.tag())
            .collect()
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A record as presented to callers: the store-assigned id plus the
/// entity type's mapped fields under their caller-facing names.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub entity_type: EntityType,
    pub fields: Fields,
}

impl Record {
    /// Extract a string field.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }

    /// Extract a numeric field. Numeric strings are accepted since stores
    /// commonly return amounts as text.
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(crate::as_number)
    }

    /// The JSON object placed in an envelope's `data`: `id` plus every mapped field.
    pub fn to_data(&self) -> serde_json::Value {
        let mut object = Fields::with_capacity(self.fields.len() + 1);
        object.insert("id".into(), serde_json::Value::String(self.id.clone()));
        for (name, value) in &self.fields {
            object.insert(name.clone(), value.clone());
        }
        serde_json::Value::Object(object)
    }
}
