//! Customer constants and validation.

use crate::error::CoreError;

/// All valid customer types.
pub const VALID_CUSTOMER_TYPES: &[&str] = &["RESIDENTIAL", "COMMERCIAL"];

/// Validate a customer type string.
pub fn validate_customer_type(customer_type: &str) -> Result<(), CoreError> {
    if VALID_CUSTOMER_TYPES.contains(&customer_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid customer type '{customer_type}'. Must be one of: {}",
            VALID_CUSTOMER_TYPES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_types() {
        assert!(validate_customer_type("RESIDENTIAL").is_ok());
        assert!(validate_customer_type("COMMERCIAL").is_ok());
        assert!(validate_customer_type("residential").is_err());
        assert!(validate_customer_type("").is_err());
    }
}
