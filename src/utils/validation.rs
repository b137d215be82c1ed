//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y resolución de los campos de fecha de los payloads.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

use crate::utils::dates::DateInput;
use crate::utils::errors::{validation_error, AppResult};

/// Distinguir entre campo ausente (`None`) y campo presente, incluso `null`
/// (`Some(..)`). Se usa con `#[serde(default, deserialize_with = "present")]`.
pub fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Resolver una fecha opcional del payload; una fecha ilegible es un error
pub fn resolve_date(input: DateInput, field: &'static str) -> AppResult<Option<NaiveDate>> {
    match input {
        DateInput::Parsed(date) => Ok(Some(date)),
        DateInput::Absent => Ok(None),
        DateInput::Unparsed(_) => Err(validation_error(field, "Expected an ISO-8601 date (YYYY-MM-DD)")),
    }
}

/// Resolver una fecha obligatoria del payload
pub fn require_date(input: DateInput, field: &'static str) -> AppResult<NaiveDate> {
    resolve_date(input, field)?.ok_or_else(|| validation_error(field, "This date is required"))
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("Value must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Mayor importe que cabe en `NUMERIC(10, 2)`
pub fn max_cost() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Validar un importe: no negativo, como mucho 99 999 999.99 y dos decimales.
/// Los ceros finales no cuentan como decimales.
pub fn validate_cost(value: &Decimal) -> Result<(), ValidationError> {
    let code = if value.is_sign_negative() && !value.is_zero() {
        "non_negative"
    } else if *value > max_cost() {
        "max_cost"
    } else if value.normalize().scale() > 2 {
        "max_two_decimals"
    } else {
        return Ok(());
    };

    let mut error = ValidationError::new(code);
    error.message = Some("Cost must be between 0 and 99999999.99 with at most two decimals".into());
    error.add_param("value".into(), &value.to_string());
    Err(error)
}

/// Recortar espacios y convertir textos vacíos en `None`
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use std::str::FromStr;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "present")]
        note: Option<Option<String>>,
    }

    #[test]
    fn test_present_distinguishes_null_from_missing() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.note, None);

        let cleared: Patch = serde_json::from_str(r#"{"note": null}"#).unwrap();
        assert_eq!(cleared.note, Some(None));

        let set: Patch = serde_json::from_str(r#"{"note": "x"}"#).unwrap();
        assert_eq!(set.note, Some(Some("x".to_string())));
    }

    #[test]
    fn test_resolve_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(resolve_date(DateInput::Parsed(date), "d").unwrap(), Some(date));
        assert_eq!(resolve_date(DateInput::Absent, "d").unwrap(), None);
        assert!(matches!(
            resolve_date(DateInput::Unparsed("bad".into()), "d"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_require_date_rejects_absent() {
        assert!(require_date(DateInput::Absent, "service_date").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Cisterna 1").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_validate_cost() {
        assert_eq!(max_cost(), Decimal::from_str("99999999.99").unwrap());
        assert!(validate_cost(&Decimal::from_str("12.50").unwrap()).is_ok());
        assert!(validate_cost(&Decimal::from_str("120.500").unwrap()).is_ok());
        assert!(validate_cost(&Decimal::ZERO).is_ok());
        assert!(validate_cost(&max_cost()).is_ok());

        let negative = validate_cost(&Decimal::from_str("-0.01").unwrap()).unwrap_err();
        assert_eq!(negative.code, "non_negative");
        let too_large = validate_cost(&Decimal::from_str("100000000").unwrap()).unwrap_err();
        assert_eq!(too_large.code, "max_cost");
        let too_precise = validate_cost(&Decimal::from_str("120.555").unwrap()).unwrap_err();
        assert_eq!(too_precise.code, "max_two_decimals");
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  ".into())), None);
        assert_eq!(normalize_optional(Some(" a ".into())), Some("a".to_string()));
        assert_eq!(normalize_optional(None), None);
    }
}
