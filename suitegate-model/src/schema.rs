use serde::Serialize;
use serde_json::Value;

use crate::entity::{EntityType, Fields, Record};
use crate::validation::has_value;

/// Describes how one entity type maps onto the record store.
///
/// Descriptors are static: every request resolves its tag to one of these
/// once, and all per-type behaviour is driven from the table below.
#[derive(Debug, Serialize)]
pub struct EntityDescriptor {
    pub entity_type: EntityType,
    /// Record type name understood by the store (e.g. `customer`, `job`).
    pub record_type: &'static str,
    pub fields: &'static [FieldMapping],
    /// Caller-facing names that must be non-blank on create.
    pub required: &'static [&'static str],
    /// Store field stamped with [`EntityDescriptor::VALIDATION_STAMP`] on every write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_stamp: Option<&'static str>,
}

/// A caller-facing field and the store field it reads from and writes to.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldMapping {
    pub name: &'static str,
    pub store_id: &'static str,
    pub field_type: FieldType,
    /// Read from this store field when `store_id` is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_store_id: Option<&'static str>,
    /// Returned on read when the store has no value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldDefault>,
    /// Never written, even when present in a payload.
    pub read_only: bool,
}

/// The data type of a mapped field. Drives the generic write checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Email,
    Phone,
    Currency,
    Percent,
    Date,
    /// Internal id of another record (customer, vendor, project).
    Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldDefault {
    Text(&'static str),
    Number(f64),
}

impl FieldDefault {
    pub fn to_value(self) -> Value {
        match self {
            FieldDefault::Text(s) => Value::String(s.to_string()),
            FieldDefault::Number(n) => serde_json::json!(n),
        }
    }
}

impl FieldMapping {
    const fn new(name: &'static str, store_id: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            store_id,
            field_type,
            fallback_store_id: None,
            default: None,
            read_only: false,
        }
    }

    const fn or_default(mut self, default: FieldDefault) -> Self {
        self.default = Some(default);
        self
    }

    const fn or_store_field(mut self, fallback: &'static str) -> Self {
        self.fallback_store_id = Some(fallback);
        self
    }

    const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

use FieldDefault::{Number as Num, Text as Txt};
use FieldType::*;

const CUSTOMER_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("companyName", "companyname", Text),
    FieldMapping::new("email", "email", Email),
    FieldMapping::new("phone", "phone", Phone),
    FieldMapping::new("address", "defaultaddress", Text),
];

const ITEM_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("itemId", "itemid", Text),
    FieldMapping::new("displayName", "displayname", Text),
    FieldMapping::new("description", "salesdescription", Text),
    FieldMapping::new("cost", "cost", Currency),
];

const PROJECT_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("name", "title", Text).or_store_field("entityid"),
    FieldMapping::new("status", "status", Text).or_default(Txt("Unknown")),
    FieldMapping::new("customer", "customer", Reference).or_default(Txt("N/A")),
    FieldMapping::new("startDate", "startdate", Date).or_default(Txt("N/A")),
    FieldMapping::new("endDate", "enddate", Date).or_default(Txt("N/A")),
];

const ESTIMATE_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("estimateNumber", "tranid", Text).read_only(),
    FieldMapping::new("customer", "entity", Reference),
    FieldMapping::new("total", "total", Currency).or_default(Num(0.0)),
    FieldMapping::new("status", "status", Text).or_default(Txt("Pending")),
    FieldMapping::new("date", "trandate", Date),
];

const PURCHASE_ORDER_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("poNumber", "tranid", Text).read_only(),
    FieldMapping::new("vendor", "entity", Reference),
    FieldMapping::new("total", "total", Currency).or_default(Num(0.0)),
    FieldMapping::new("status", "status", Text).or_default(Txt("Pending")),
    FieldMapping::new("date", "trandate", Date),
];

const PROJECT_TASK_FIELDS: &[FieldMapping] = &[
    FieldMapping::new("title", "title", Text),
    FieldMapping::new("project", "project", Reference),
    FieldMapping::new("company", "company", Reference),
    FieldMapping::new("status", "status", Text),
    FieldMapping::new("percentComplete", "percentworkcomplete", Percent)
        .or_default(Num(0.0))
        .read_only(),
    FieldMapping::new("startDate", "startdate", Date),
    FieldMapping::new("endDate", "enddate", Date),
];

static CUSTOMER: EntityDescriptor = EntityDescriptor {
    entity_type: EntityType::Customer,
    record_type: "customer",
    fields: CUSTOMER_FIELDS,
    required: &["companyName"],
    validation_stamp: Some("custentity_validation_status"),
};

static ITEM: EntityDescriptor = EntityDescriptor {
    entity_type: EntityType::Item,
    record_type: "inventoryitem",
    fields: ITEM_FIELDS,
    required: &["itemId"],
    validation_stamp: None,
};

static PROJECT: EntityDescriptor = EntityDescriptor {
    entity_type: EntityType::Project,
    record_type: "job",
    fields: PROJECT_FIELDS,
    required: &["name"],
    validation_stamp: None,
};

static ESTIMATE: EntityDescriptor = EntityDescriptor {
    entity_type: EntityType::Estimate,
    record_type: "estimate",
    fields: ESTIMATE_FIELDS,
    required: &["customer"],
    validation_stamp: None,
};

static PURCHASE_ORDER: EntityDescriptor = EntityDescriptor {
    entity_type: EntityType::PurchaseOrder,
    record_type: "purchaseorder",
    fields: PURCHASE_ORDER_FIELDS,
    required: &["vendor"],
    validation_stamp: Some("custbody_po_validation_status"),
};

static PROJECT_TASK: EntityDescriptor = EntityDescriptor {
    entity_type: EntityType::ProjectTask,
    record_type: "projecttask",
    fields: PROJECT_TASK_FIELDS,
    required: &["title", "project"],
    validation_stamp: None,
};

impl EntityDescriptor {
    /// Value written into the validation stamp field.
    pub const VALIDATION_STAMP: &'static str = "Pending Review";

    pub fn for_type(entity_type: EntityType) -> &'static EntityDescriptor {
        match entity_type {
            EntityType::Customer => &CUSTOMER,
            EntityType::Item => &ITEM,
            EntityType::Project => &PROJECT,
            EntityType::Estimate => &ESTIMATE,
            EntityType::PurchaseOrder => &PURCHASE_ORDER,
            EntityType::ProjectTask => &PROJECT_TASK,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Store columns needed to build a [`Record`] for this type.
    pub fn store_columns(&self) -> Vec<&'static str> {
        let mut columns = Vec::with_capacity(self.fields.len() + 1);
        for field in self.fields {
            if !columns.contains(&field.store_id) {
                columns.push(field.store_id);
            }
            if let Some(fallback) = field.fallback_store_id {
                if !columns.contains(&fallback) {
                    columns.push(fallback);
                }
            }
        }
        columns
    }

    /// Translate a caller payload into store fields.
    ///
    /// Only writable mapped fields carrying a value are kept; unknown keys,
    /// nulls and blank strings are dropped.
    pub fn to_store_fields(&self, payload: &Fields) -> Fields {
        let mut out = Fields::new();
        for field in self.fields.iter().filter(|f| !f.read_only) {
            if let Some(value) = payload.get(field.name).filter(|v| has_value(Some(*v))) {
                out.insert(field.store_id.to_string(), value.clone());
            }
        }
        out
    }

    /// Build a caller-facing record from a raw store row, applying fallbacks
    /// and read defaults. Fields with neither become `null`.
    pub fn from_store_fields(&self, id: impl Into<String>, row: &Fields) -> Record {
        let mut fields = Fields::with_capacity(self.fields.len());
        for field in self.fields {
            let value = [Some(field.store_id), field.fallback_store_id]
                .into_iter()
                .flatten()
                .filter_map(|store_id| row.get(store_id))
                .find(|v| has_value(Some(*v)))
                .cloned()
                .or_else(|| field.default.map(FieldDefault::to_value))
                .unwrap_or(Value::Null);
            fields.insert(field.name.to_string(), value);
        }
        Record {
            id: id.into(),
            entity_type: self.entity_type,
            fields,
        }
    }
}
