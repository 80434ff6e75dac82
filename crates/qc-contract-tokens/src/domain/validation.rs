//! # Validator
//!
//! Pure well-formedness checks run before a request is built.
//! Nothing here performs I/O; every rejection is terminal for the operation.

use crate::domain::value_objects::{
    limits, ContentToken, Did, PublishType, RbtAmount, TransactionType,
};
use crate::errors::{ContractTokenError, ContractTokenResult};

/// Validate a DID for the given actor role (e.g. "DID", "deployer DID").
///
/// # Errors
///
/// `InvalidDid` unless the value starts with [`limits::DID_PREFIX`] and is at
/// least [`limits::DID_MIN_LEN`] bytes long.
pub fn validate_did(value: &str, role: &'static str) -> ContractTokenResult<Did> {
    if !value.starts_with(limits::DID_PREFIX) || value.len() < limits::DID_MIN_LEN {
        return Err(ContractTokenError::InvalidDid {
            role,
            value: value.to_string(),
        });
    }
    Ok(Did::new_unchecked(value.to_string()))
}

/// Validate a content token.
///
/// # Errors
///
/// `InvalidToken` unless the value starts with [`limits::TOKEN_PREFIX`] and is
/// at least [`limits::TOKEN_MIN_LEN`] bytes long.
pub fn validate_token(value: &str) -> ContractTokenResult<ContentToken> {
    if value.len() < limits::TOKEN_MIN_LEN || !value.starts_with(limits::TOKEN_PREFIX) {
        return Err(ContractTokenError::InvalidToken(value.to_string()));
    }
    Ok(ContentToken::new_unchecked(value.to_string()))
}

/// Validate that `code` lies in the inclusive range `lo..=hi`.
///
/// # Errors
///
/// `InvalidEnum` naming `field` when the code is out of range.
pub fn validate_range(
    code: i64,
    lo: i64,
    hi: i64,
    field: &'static str,
) -> ContractTokenResult<i64> {
    if code < lo || code > hi {
        return Err(ContractTokenError::InvalidEnum { field, code, lo, hi });
    }
    Ok(code)
}

/// Validate a deploy/execute transaction type (0, 1 or 2).
///
/// # Errors
///
/// `InvalidEnum` for any other code.
pub fn validate_transaction_type(code: i64) -> ContractTokenResult<TransactionType> {
    let (lo, hi) = limits::TRANSACTION_TYPE_RANGE;
    let code = validate_range(code, lo, hi, "transaction type")?;
    let code = narrow(code, lo, hi, "transaction type")?;
    Ok(TransactionType::new_unchecked(code))
}

/// Validate a publish type (0 or 1).
///
/// # Errors
///
/// `InvalidEnum` for any other code.
pub fn validate_publish_type(code: i64) -> ContractTokenResult<PublishType> {
    let (lo, hi) = limits::PUBLISH_TYPE_RANGE;
    let code = validate_range(code, lo, hi, "publish type")?;
    let code = narrow(code, lo, hi, "publish type")?;
    Ok(PublishType::new_unchecked(code))
}

fn narrow(code: i64, lo: i64, hi: i64, field: &'static str) -> ContractTokenResult<u8> {
    u8::try_from(code).map_err(|_| ContractTokenError::InvalidEnum { field, code, lo, hi })
}

/// Validate a deployment amount against the minimum granularity.
///
/// Zero is always rejected, whatever `minimum` is. `NaN` fails both checks.
/// Infinities have no JSON encoding and are rejected too.
///
/// # Errors
///
/// `InvalidAmount` unless `amount` is finite, `amount > 0` and `amount >= minimum`.
pub fn validate_amount(amount: f64, minimum: f64) -> ContractTokenResult<RbtAmount> {
    if !(amount.is_finite() && amount > 0.0 && amount >= minimum) {
        return Err(ContractTokenError::InvalidAmount { amount, minimum });
    }
    Ok(RbtAmount::new_unchecked(amount))
}

/// Validate that a code/schema location was supplied.
///
/// # Errors
///
/// `MissingInput` naming `field` when the path is empty.
pub fn validate_required_path(path: &str, field: &'static str) -> ContractTokenResult<String> {
    if path.is_empty() {
        return Err(ContractTokenError::MissingInput(field));
    }
    Ok(path.to_string())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn did_of_len(len: usize) -> String {
        let mut did = limits::DID_PREFIX.to_string();
        did.push_str(&"a".repeat(len - limits::DID_PREFIX.len()));
        did
    }

    fn token_of_len(len: usize) -> String {
        let mut token = limits::TOKEN_PREFIX.to_string();
        token.push_str(&"b".repeat(len - limits::TOKEN_PREFIX.len()));
        token
    }

    #[test]
    fn test_did_length_boundary() {
        assert!(matches!(
            validate_did(&did_of_len(58), "DID"),
            Err(ContractTokenError::InvalidDid { role: "DID", .. })
        ));
        assert!(validate_did(&did_of_len(59), "DID").is_ok());
    }

    #[test]
    fn test_did_wrong_prefix() {
        let did = format!("bafybmj{}", "a".repeat(60));
        assert!(validate_did(&did, "deployer DID").is_err());
    }

    #[test]
    fn test_token_length_boundary() {
        assert!(validate_token(&token_of_len(45)).is_err());
        let token = validate_token(&token_of_len(46)).unwrap();
        assert_eq!(token.as_str().len(), 46);
    }

    #[test]
    fn test_token_wrong_prefix() {
        assert!(validate_token(&format!("Qn{}", "b".repeat(50))).is_err());
        assert!(validate_token("").is_err());
    }

    #[test]
    fn test_range_boundaries() {
        assert!(validate_range(0, 0, 2, "transaction type").is_ok());
        assert!(validate_range(2, 0, 2, "transaction type").is_ok());
        assert!(validate_range(-1, 0, 2, "transaction type").is_err());
        assert!(validate_range(3, 0, 2, "transaction type").is_err());
    }

    #[test]
    fn test_typed_codes() {
        assert_eq!(validate_transaction_type(2).unwrap().code(), 2);
        assert!(validate_transaction_type(3).is_err());
        assert_eq!(validate_publish_type(1).unwrap().code(), 1);
        assert!(matches!(
            validate_publish_type(2),
            Err(ContractTokenError::InvalidEnum { field: "publish type", .. })
        ));
    }

    #[test]
    fn test_amount_minimum_boundary() {
        assert!(validate_amount(0.000_01, limits::MIN_RBT_AMOUNT).is_ok());
        assert!(matches!(
            validate_amount(0.000_009, limits::MIN_RBT_AMOUNT),
            Err(ContractTokenError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_amount_zero_and_nan() {
        assert!(validate_amount(0.0, 0.0).is_err());
        assert!(validate_amount(0.0, -1.0).is_err());
        assert!(validate_amount(-5.0, limits::MIN_RBT_AMOUNT).is_err());
        assert!(validate_amount(f64::NAN, limits::MIN_RBT_AMOUNT).is_err());
    }

    #[test]
    fn test_amount_infinite() {
        assert!(matches!(
            validate_amount(f64::INFINITY, limits::MIN_RBT_AMOUNT),
            Err(ContractTokenError::InvalidAmount { .. })
        ));
        assert!(validate_amount(f64::NEG_INFINITY, f64::NEG_INFINITY).is_err());
        assert!(validate_amount(f64::MAX, limits::MIN_RBT_AMOUNT).is_ok());
    }

    #[test]
    fn test_required_path() {
        assert_eq!(validate_required_path("code.wasm", "Binary code file").unwrap(), "code.wasm");
        assert_eq!(
            validate_required_path("", "Schema file"),
            Err(ContractTokenError::MissingInput("Schema file"))
        );
    }

    proptest! {
        #[test]
        fn prop_did_iff_prefix_and_length(suffix in "[a-z0-9]{0,70}", prefixed in any::<bool>()) {
            let s = if prefixed { format!("{}{suffix}", limits::DID_PREFIX) } else { suffix };
            let expected = s.len() >= limits::DID_MIN_LEN && s.starts_with(limits::DID_PREFIX);
            prop_assert_eq!(validate_did(&s, "DID").is_ok(), expected);
        }

        #[test]
        fn prop_did_arbitrary_strings(s in any::<String>()) {
            let expected = s.len() >= limits::DID_MIN_LEN && s.starts_with(limits::DID_PREFIX);
            prop_assert_eq!(validate_did(&s, "DID").is_ok(), expected);
        }

        #[test]
        fn prop_token_iff_prefix_and_length(suffix in "[A-Za-z0-9]{0,60}", prefixed in any::<bool>()) {
            let s = if prefixed { format!("{}{suffix}", limits::TOKEN_PREFIX) } else { suffix };
            let expected = s.len() >= limits::TOKEN_MIN_LEN && s.starts_with(limits::TOKEN_PREFIX);
            prop_assert_eq!(validate_token(&s).is_ok(), expected);
        }

        #[test]
        fn prop_range_inclusive(code in -10i64..10, lo in -5i64..5, width in 0i64..5) {
            let hi = lo + width;
            prop_assert_eq!(validate_range(code, lo, hi, "code").is_ok(), lo <= code && code <= hi);
        }

        #[test]
        fn prop_amount_positive_and_above_minimum(v in -1.0f64..1.0, min in -0.5f64..0.5) {
            prop_assert_eq!(validate_amount(v, min).is_ok(), v > 0.0 && v >= min);
            prop_assert!(validate_amount(0.0, min).is_err());
        }
    }
}
