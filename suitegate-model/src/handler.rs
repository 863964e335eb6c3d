use crate::entity::{EntityType, Fields};
use crate::schema::{EntityDescriptor, FieldType};
use crate::validation::{
    ValidationError, ValidationResult, as_number, has_value, validate_email_format,
    validate_required,
};

/// Which kind of write a payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Full payload; required fields must be present.
    Create,
    /// Partial payload; only the keys present are checked.
    Update,
}

/// Write rules for one entity type, run before the store is touched.
///
/// The default implementation covers what every entity type needs:
/// - required fields on create, and no blanking of them on update
/// - well-formed values for email and currency fields that are present
///
/// Entity types with extra business rules override [`RecordValidator::validate`]
/// and call [`RecordValidator::validate_fields`] for the common checks.
pub trait RecordValidator: Send + Sync {
    fn validate(
        &self,
        descriptor: &EntityDescriptor,
        payload: &Fields,
        mode: WriteMode,
    ) -> ValidationResult<()> {
        self.validate_fields(descriptor, payload, mode)
    }

    fn validate_fields(
        &self,
        descriptor: &EntityDescriptor,
        payload: &Fields,
        mode: WriteMode,
    ) -> ValidationResult<()> {
        match mode {
            WriteMode::Create => validate_required(descriptor.required, payload)?,
            WriteMode::Update => {
                let present: Vec<&str> = descriptor
                    .required
                    .iter()
                    .copied()
                    .filter(|name| payload.contains_key(*name))
                    .collect();
                validate_required(&present, payload)?;
            }
        }

        for field in descriptor.fields.iter().filter(|f| !f.read_only) {
            let Some(value) = payload.get(field.name).filter(|v| has_value(Some(*v))) else {
                continue;
            };
            match field.field_type {
                FieldType::Email => {
                    let valid = value.as_str().is_some_and(|s| validate_email_format(s));
                    if !valid {
                        return Err(ValidationError::invalid(
                            field.name,
                            "expected an address like user@example.com",
                        ));
                    }
                }
                FieldType::Currency | FieldType::Percent => {
                    if as_number(value).is_none() {
                        return Err(ValidationError::invalid(field.name, "expected a number"));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Descriptor-driven checks only.
struct StandardRules;
impl RecordValidator for StandardRules {}

/// Purchase orders additionally need a strictly positive total. On create
/// an absent total counts as zero.
struct PurchaseOrderRules;
impl RecordValidator for PurchaseOrderRules {
    fn validate(
        &self,
        descriptor: &EntityDescriptor,
        payload: &Fields,
        mode: WriteMode,
    ) -> ValidationResult<()> {
        self.validate_fields(descriptor, payload, mode)?;
        let total = payload.get("total").filter(|v| has_value(Some(*v)));
        let positive = match (total, mode) {
            (Some(total), _) => as_number(total).is_some_and(|t| t > 0.0),
            (None, WriteMode::Create) => false,
            (None, WriteMode::Update) => true,
        };
        if !positive {
            return Err(ValidationError::out_of_range(
                "total",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// The rule set applied to writes of `entity_type`.
pub fn validator_for(entity_type: EntityType) -> &'static dyn RecordValidator {
    match entity_type {
        EntityType::PurchaseOrder => &PurchaseOrderRules,
        _ => &StandardRules,
    }
}
