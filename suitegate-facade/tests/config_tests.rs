use pretty_assertions::assert_eq;
use serde_json::json;
use suitegate_facade::{EntityQuery, EntityRequest, Envelope, FacadeConfig, FacadeError};

#[test]
fn defaults() {
    let config = FacadeConfig::default();
    assert_eq!(config.page_size, 100);
    assert_eq!(config.approval_threshold, 5000.0);
    assert_eq!(config.acting_user, "system");
}

#[test]
fn request_splits_entity_id_and_fields() {
    let request: EntityRequest = serde_json::from_value(json!({
        "entity": "customers",
        "id": 42,
        "companyName": "Acme",
        "email": "a@b.co"
    }))
    .unwrap();

    assert_eq!(request.entity.as_deref(), Some("customers"));
    assert_eq!(request.id.as_deref(), Some("42"));
    assert_eq!(request.fields.len(), 2);
    assert_eq!(request.fields["companyName"], "Acme");
}

#[test]
fn blank_or_null_id_is_absent() {
    for id in [json!(null), json!(""), json!("  ")] {
        let request: EntityRequest =
            serde_json::from_value(json!({"entity": "items", "id": id})).unwrap();
        assert_eq!(request.id, None);
    }
}

#[test]
fn object_id_is_rejected() {
    let result: Result<EntityRequest, _> =
        serde_json::from_value(json!({"entity": "items", "id": {"n": 1}}));
    assert!(result.is_err());
}

#[test]
fn query_converts_to_request() {
    let request = EntityRequest::from(EntityQuery {
        entity: Some("items".into()),
        id: Some("".into()),
    });
    assert_eq!(request.entity.as_deref(), Some("items"));
    assert_eq!(request.id, None);
    assert!(request.fields.is_empty());
}

#[test]
fn envelope_omits_absent_members() {
    let failure = serde_json::to_value(Envelope::failure("nope")).unwrap();
    assert_eq!(failure, json!({"success": false, "message": "nope"}));

    let done = serde_json::to_value(Envelope::done("Item created successfully", "9")).unwrap();
    assert_eq!(
        done,
        json!({"success": true, "message": "Item created successfully", "id": "9"})
    );

    let data = serde_json::to_value(Envelope::data(json!([]))).unwrap();
    assert_eq!(data, json!({"success": true, "data": []}));
}

#[test]
fn unsupported_tag_message_lists_supported_tags() {
    let err = FacadeError::UnsupportedEntityType {
        tag: "widgets".into(),
        supported: vec!["customers", "items", "projects"],
    };
    assert_eq!(
        err.to_string(),
        "Unsupported entity type \"widgets\". Use \"customers\", \"items\", or \"projects\"."
    );
    assert_eq!(
        Envelope::from(err),
        Envelope::failure(
            "Unsupported entity type \"widgets\". Use \"customers\", \"items\", or \"projects\"."
        )
    );
}
