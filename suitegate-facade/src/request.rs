use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use suitegate_model::Fields;

/// The four façade operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Read,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn is_mutation(self) -> bool {
        !matches!(self, Operation::Read)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        })
    }
}

/// A request envelope: `{ entity, id?, ...fields }`.
///
/// Every key other than `entity` and `id` lands in `fields`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EntityRequest {
    #[serde(default)]
    pub entity: Option<String>,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: Fields,
}

/// Query-string form used by reads and deletes: `?entity=..&id=..`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EntityQuery {
    pub entity: Option<String>,
    pub id: Option<String>,
}

impl EntityRequest {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: Some(entity.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }
}

impl From<EntityQuery> for EntityRequest {
    fn from(query: EntityQuery) -> Self {
        Self {
            entity: query.entity,
            id: query.id.filter(|id| !id.trim().is_empty()),
            fields: Fields::new(),
        }
    }
}

/// Ids arrive as strings or as bare numbers; blank means absent.
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "id must be a string or number, got {other}"
        ))),
    }
}
