//! # Validation Module
//!
//! Input validation for the Stockroom ledger.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input surface (form / CLI / API)                             │
//! │  ├── Character filtering (digits-only phone field)                     │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  ├── Runs fully BEFORE any mutation (no partial commits)               │
//! │  └── First failing rule wins, later rules are skipped                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lending Record Rule Order
//! 1. required fields present and non-blank
//! 2. usn exactly 10 characters
//! 3. phone number exactly 10 characters
//! 4. return date strictly later than taken date (when present)
//! 5. quantity positive
//! 6. borrow: quantity within availability
//! 7. purchase: quantity within master count

use crate::error::{CoreError, CoreResult, ValidationError, ValidationResult};
use crate::types::{LendingRecord, NewLendingRecord, Product, RecordType};
use crate::{PHONE_LENGTH, USN_LENGTH};

use chrono::Utc;
use uuid::Uuid;

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Raspberry Pi 4").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a stock counter supplied at product creation or update.
pub fn validate_count(field: &str, count: i64) -> ValidationResult<()> {
    if count < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a restock / defect quantity.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Lending Record Validation
// =============================================================================

/// Validates a new lending record against the current product state and,
/// on success, returns the normalized record ready to commit.
///
/// Rules run in a fixed order and the first failure wins; no partial
/// normalization or mutation escapes this function.
///
/// Normalization on success:
/// - `student_name`, `phone_number` trimmed
/// - `usn`, `section` trimmed and upper-cased
pub fn validate_record(product: &Product, input: &NewLendingRecord) -> CoreResult<LendingRecord> {
    // Rule 1: required fields non-blank. taken_date is structurally
    // required by its type.
    require_non_blank("student name", &input.student_name)?;
    require_non_blank("usn", &input.usn)?;
    require_non_blank("phone number", &input.phone_number)?;
    require_non_blank("section", &input.section)?;

    // Rule 2: usn exact length (character count, post-trim).
    let usn = input.usn.trim();
    if usn.chars().count() != USN_LENGTH {
        return Err(ValidationError::WrongLength {
            field: "usn".to_string(),
            expected: USN_LENGTH,
        }
        .into());
    }

    // Rule 3: phone exact length. Digits-only filtering is the input
    // layer's job; the ledger only re-checks the length.
    let phone = input.phone_number.trim();
    if phone.chars().count() != PHONE_LENGTH {
        return Err(ValidationError::WrongLength {
            field: "phone number".to_string(),
            expected: PHONE_LENGTH,
        }
        .into());
    }

    // Rule 4: return date strictly after taken date. Equal is rejected.
    if let Some(return_date) = input.return_date {
        if return_date <= input.taken_date {
            return Err(ValidationError::ReturnNotAfterTaken.into());
        }
    }

    // Rule 5: positive quantity.
    if input.quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .into());
    }

    // Rules 6/7: stock checks against the referenced product.
    match input.record_type {
        RecordType::Borrow if !product.can_borrow(input.quantity) => {
            return Err(CoreError::InsufficientAvailable {
                name: product.name.clone(),
                available: product.availability,
                requested: input.quantity,
            });
        }
        RecordType::Purchase if !product.can_purchase(input.quantity) => {
            return Err(CoreError::InsufficientOwned {
                name: product.name.clone(),
                owned: product.master_count,
                requested: input.quantity,
            });
        }
        _ => {}
    }

    Ok(LendingRecord {
        id: Uuid::new_v4().to_string(),
        product_id: input.product_id.clone(),
        student_name: input.student_name.trim().to_string(),
        usn: usn.to_uppercase(),
        phone_number: phone.to_string(),
        section: input.section.trim().to_uppercase(),
        taken_date: input.taken_date,
        return_date: input.return_date,
        record_type: input.record_type,
        quantity: input.quantity,
        created_at: Utc::now(),
    })
}

fn require_non_blank(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn product() -> Product {
        Product::new("Arduino Uno", 50, 45)
    }

    fn input() -> NewLendingRecord {
        NewLendingRecord {
            product_id: "p1".to_string(),
            student_name: "  John Doe ".to_string(),
            usn: "1ms21cs001".to_string(),
            phone_number: "9876543210".to_string(),
            section: " a ".to_string(),
            taken_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            return_date: None,
            record_type: RecordType::Borrow,
            quantity: 2,
        }
    }

    #[test]
    fn test_valid_record_is_normalized() {
        let record = validate_record(&product(), &input()).unwrap();
        assert_eq!(record.student_name, "John Doe");
        assert_eq!(record.usn, "1MS21CS001");
        assert_eq!(record.section, "A");
        assert_eq!(record.phone_number, "9876543210");
        assert!(!record.id.is_empty());
    }

    #[test]
    fn test_blank_fields_rejected() {
        for field in ["student_name", "usn", "phone_number", "section"] {
            let mut bad = input();
            match field {
                "student_name" => bad.student_name = "  ".to_string(),
                "usn" => bad.usn = String::new(),
                "phone_number" => bad.phone_number = " ".to_string(),
                _ => bad.section = String::new(),
            }
            let err = validate_record(&product(), &bad).unwrap_err();
            assert!(
                matches!(
                    err,
                    CoreError::Validation(ValidationError::Required { .. })
                ),
                "expected Required for {field}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_usn_length() {
        let mut bad = input();
        bad.usn = "1MS21CS00".to_string(); // 9 chars
        assert!(validate_record(&product(), &bad).is_err());

        bad.usn = "1MS21CS0011".to_string(); // 11 chars
        assert!(validate_record(&product(), &bad).is_err());

        bad.usn = "1MS21CS001".to_string(); // 10 chars
        assert!(validate_record(&product(), &bad).is_ok());
    }

    #[test]
    fn test_phone_length() {
        let mut bad = input();
        bad.phone_number = "987654321".to_string();
        let err = validate_record(&product(), &bad).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::WrongLength { .. })
        ));
    }

    #[test]
    fn test_return_date_ordering() {
        let taken = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        let mut rec = input();
        rec.return_date = Some(taken); // equal: rejected
        let err = validate_record(&product(), &rec).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::ReturnNotAfterTaken)
        ));

        rec.return_date = Some(taken.succ_opt().unwrap()); // one day later: accepted
        assert!(validate_record(&product(), &rec).is_ok());
    }

    #[test]
    fn test_quantity_positive() {
        let mut bad = input();
        bad.quantity = 0;
        assert!(validate_record(&product(), &bad).is_err());

        bad.quantity = -3;
        assert!(validate_record(&product(), &bad).is_err());
    }

    #[test]
    fn test_borrow_checks_availability() {
        let mut rec = input();
        rec.quantity = 46; // availability is 45
        let err = validate_record(&product(), &rec).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientAvailable { .. }));

        rec.quantity = 45;
        assert!(validate_record(&product(), &rec).is_ok());
    }

    #[test]
    fn test_purchase_checks_master_count() {
        let mut rec = input();
        rec.record_type = RecordType::Purchase;
        rec.quantity = 50; // master count is 50
        assert!(validate_record(&product(), &rec).is_ok());

        rec.quantity = 51;
        let err = validate_record(&product(), &rec).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientOwned { .. }));
    }

    #[test]
    fn test_rule_order_first_failure_wins() {
        // Bad usn AND bad quantity: the usn rule fires first.
        let mut bad = input();
        bad.usn = "SHORT".to_string();
        bad.quantity = 0;
        let err = validate_record(&product(), &bad).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::WrongLength { .. })
        ));
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Breadboard").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_count_and_quantity() {
        assert!(validate_count("master count", 0).is_ok());
        assert!(validate_count("master count", -1).is_err());
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
    }
}
