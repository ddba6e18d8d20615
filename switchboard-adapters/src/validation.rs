//! Validation Traits
//!
//! Common validation patterns shared by adapters and the action
//! orchestrator. Failures are plain descriptive strings because on the
//! action path they become user-visible failure results, not errors.

/// Trait for validating non-empty strings.
pub trait ValidateNonEmpty {
    /// Validate that the value is present and non-blank.
    ///
    /// # Arguments
    /// - `field_name`: Name of the field for the message
    fn validate_non_empty(&self, field_name: &str) -> Result<(), String>;
}

impl ValidateNonEmpty for str {
    fn validate_non_empty(&self, field_name: &str) -> Result<(), String> {
        if self.trim().is_empty() {
            return Err(format!("Required field missing: {field_name}"));
        }
        Ok(())
    }
}

impl ValidateNonEmpty for String {
    fn validate_non_empty(&self, field_name: &str) -> Result<(), String> {
        self.as_str().validate_non_empty(field_name)
    }
}

impl ValidateNonEmpty for Option<&str> {
    fn validate_non_empty(&self, field_name: &str) -> Result<(), String> {
        match self {
            Some(value) => value.validate_non_empty(field_name),
            None => Err(format!("Required field missing: {field_name}")),
        }
    }
}

/// Trait for validating values expected in the unit interval.
pub trait ValidateUnitRange {
    /// Validate that the value lies in [0, 1].
    fn validate_unit_range(&self, field_name: &str) -> Result<(), String>;
}

impl ValidateUnitRange for f32 {
    fn validate_unit_range(&self, field_name: &str) -> Result<(), String> {
        if !(0.0..=1.0).contains(self) {
            return Err(format!(
                "Invalid value for {field_name}: {self} is outside [0, 1]"
            ));
        }
        Ok(())
    }
}
