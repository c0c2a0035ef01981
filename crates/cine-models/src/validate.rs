//! Range checks shared by the value type constructors.
//!
//! NaN never satisfies a check.

use crate::error::{ModelError, ModelResult};

pub(crate) fn ensure_positive(field: &'static str, value: f64, unit: &str) -> ModelResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::validation(
            field,
            format!("must be positive, got {}{}", value, unit),
        ))
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f64, unit: &str) -> ModelResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::validation(
            field,
            format!("must be >= 0, got {}{}", value, unit),
        ))
    }
}
