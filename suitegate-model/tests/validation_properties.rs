//! Property-based tests for the field validators.

use proptest::prelude::*;
use suitegate_model::{
    ApprovalDecision, ApprovalOutcome, ApprovalPolicy, Fields, validate_email_format,
    validate_required, validate_threshold,
};

fn local_part() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9._+-]{1,20}").unwrap()
}

fn label() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9-]{1,15}").unwrap()
}

proptest! {
    #[test]
    fn well_formed_addresses_pass(local in local_part(), host in label(), tld in "[a-z]{2,6}") {
        let email = format!("{local}@{host}.{tld}");
        prop_assert!(validate_email_format(&email));
    }

    #[test]
    fn embedded_whitespace_fails(local in local_part(), host in label(), ws in "[ \t\n]") {
        let email = format!("{local}{ws}@{host}.com");
        prop_assert!(!validate_email_format(&email));
    }

    #[test]
    fn domain_without_dot_fails(local in local_part(), host in "[a-z0-9]{1,20}") {
        let email = format!("{local}@{host}");
        prop_assert!(!validate_email_format(&email));
    }

    #[test]
    fn threshold_splits_at_boundary(total in 0.0f64..1_000_000.0, threshold in 0.0f64..1_000_000.0) {
        let decision = validate_threshold(total, threshold);
        if total <= threshold {
            prop_assert_eq!(decision, ApprovalDecision::AutoApprove);
        } else {
            prop_assert_eq!(decision, ApprovalDecision::NeedsApproval);
        }
    }

    #[test]
    fn approved_orders_are_never_touched(total in 0.0f64..1_000_000.0) {
        let policy = ApprovalPolicy::default();
        prop_assert_eq!(policy.evaluate(total, Some("Approved")), ApprovalOutcome::Unchanged);
    }

    #[test]
    fn whitespace_only_required_field_fails(ws in "[ \t]{0,8}") {
        let mut payload = Fields::new();
        payload.insert("companyName".into(), serde_json::Value::String(ws));
        prop_assert!(validate_required(&["companyName"], &payload).is_err());
    }
}
