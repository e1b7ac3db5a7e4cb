//! # Validation Module
//!
//! Input validation for catalog mutations.
//!
//! These checks run at the engine's entry points before any state changes,
//! so a validation failure always means nothing was mutated. Business rule
//! checks (stock sufficiency, role gates, register state) live with their
//! operations; this module covers only field-level input hygiene.

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product display name: required, non-blank.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }
    Ok(())
}

/// Validates a catalog price. Zero is allowed (free items); negative is not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::NegativeAmount { field: "price" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_name_must_be_non_blank() {
        assert!(validate_product_name("Apples").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
    }

    #[test]
    fn price_may_be_zero_but_not_negative() {
        assert!(validate_price(Money::new(2.99)).is_ok());
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::new(-0.01)).is_err());
    }
}
