use pretty_assertions::assert_eq;
use serde_json::json;
use suitegate_model::{EntityType, Fields, Record};

fn make_record(fields: serde_json::Value) -> Record {
    let fields: Fields = match fields {
        serde_json::Value::Object(map) => map,
        _ => panic!("fields must be an object"),
    };
    Record {
        id: "42".to_string(),
        entity_type: EntityType::Customer,
        fields,
    }
}

// ── Tags ────────────────────────────────────────────────────────

#[test]
fn every_type_round_trips_through_its_tag() {
    for entity_type in EntityType::ALL {
        assert_eq!(EntityType::from_tag(entity_type.tag()), Some(entity_type));
    }
}

#[test]
fn tags_match_api_names() {
    assert_eq!(EntityType::Customer.tag(), "customers");
    assert_eq!(EntityType::Item.tag(), "items");
    assert_eq!(EntityType::Project.tag(), "projects");
    assert_eq!(EntityType::Estimate.tag(), "estimates");
    assert_eq!(EntityType::PurchaseOrder.tag(), "purchaseorders");
    assert_eq!(EntityType::ProjectTask.tag(), "projecttasks");
}

#[test]
fn unknown_tag_is_rejected() {
    assert_eq!(EntityType::from_tag("widgets"), None);
    assert_eq!(EntityType::from_tag(""), None);
}

#[test]
fn tags_are_case_sensitive() {
    assert_eq!(EntityType::from_tag("Customers"), None);
    assert_eq!(EntityType::from_tag("purchaseOrders"), None);
}

#[test]
fn project_tasks_are_read_only() {
    assert!(!EntityType::ProjectTask.is_writable());
    assert!(EntityType::Customer.is_writable());
    assert!(EntityType::PurchaseOrder.is_writable());
}

#[test]
fn writable_tags_exclude_project_tasks() {
    assert_eq!(
        EntityType::writable_tags(),
        vec!["customers", "items", "projects", "estimates", "purchaseorders"]
    );
    assert_eq!(EntityType::readable_tags().len(), 6);
    assert!(EntityType::readable_tags().contains(&"projecttasks"));
}

#[test]
fn serde_uses_tags() {
    let json = serde_json::to_string(&EntityType::PurchaseOrder).unwrap();
    assert_eq!(json, "\"purchaseorders\"");
    let parsed: EntityType = serde_json::from_str("\"projecttasks\"").unwrap();
    assert_eq!(parsed, EntityType::ProjectTask);
}

#[test]
fn display_prints_tag() {
    assert_eq!(EntityType::Estimate.to_string(), "estimates");
}

// ── Record accessors ────────────────────────────────────────────

#[test]
fn get_str_reads_string_fields() {
    let record = make_record(json!({"companyName": "Acme", "phone": null}));
    assert_eq!(record.get_str("companyName"), Some("Acme"));
    assert_eq!(record.get_str("phone"), None);
    assert_eq!(record.get_str("missing"), None);
}

#[test]
fn get_number_accepts_numeric_strings() {
    let record = make_record(json!({"total": "4999.99", "cost": 12.5, "name": "x"}));
    assert_eq!(record.get_number("total"), Some(4999.99));
    assert_eq!(record.get_number("cost"), Some(12.5));
    assert_eq!(record.get_number("name"), None);
}

#[test]
fn to_data_puts_id_alongside_fields() {
    let record = make_record(json!({"companyName": "Acme", "email": "ops@acme.io"}));
    assert_eq!(
        record.to_data(),
        json!({"id": "42", "companyName": "Acme", "email": "ops@acme.io"})
    );
}
