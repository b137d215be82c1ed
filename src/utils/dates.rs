//! Primitivas de fechas
//!
//! Aritmética de calendario (meses, años, días restantes) y el tipo
//! `DateInput`, que resuelve una sola vez en la frontera JSON si una fecha
//! llegó ausente, válida o ilegible.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fecha tal como llega del exterior
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DateInput {
    #[default]
    Absent,
    Parsed(NaiveDate),
    Unparsed(String),
}

impl DateInput {
    /// Clasificar un texto crudo
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return DateInput::Absent;
        }
        match parse_flexible_date(raw) {
            Some(date) => DateInput::Parsed(date),
            None => DateInput::Unparsed(raw.to_string()),
        }
    }

    /// Fecha utilizable, si la hay
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DateInput::Parsed(date) => Some(*date),
            DateInput::Absent | DateInput::Unparsed(_) => None,
        }
    }

    pub fn is_unparsed(&self) -> bool {
        matches!(self, DateInput::Unparsed(_))
    }
}

impl From<Option<NaiveDate>> for DateInput {
    fn from(value: Option<NaiveDate>) -> Self {
        match value {
            Some(date) => DateInput::Parsed(date),
            None => DateInput::Absent,
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Parsed(value)
    }
}

impl<'de> Deserialize<'de> for DateInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Cualquier valor JSON es aceptado; lo que no sea texto queda como ilegible
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(serde_json::Value::Null) => DateInput::Absent,
            Some(serde_json::Value::String(raw)) => DateInput::from_raw(&raw),
            Some(other) => DateInput::Unparsed(other.to_string()),
        })
    }
}

impl Serialize for DateInput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DateInput::Absent => serializer.serialize_none(),
            DateInput::Parsed(date) => date.serialize(serializer),
            DateInput::Unparsed(raw) => serializer.serialize_str(raw),
        }
    }
}

/// Interpretar `YYYY-MM-DD`, RFC 3339 o un timestamp ISO sin zona.
/// Devuelve `None` para texto vacío o ilegible.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|datetime| datetime.date())
        .ok()
}

/// Sumar meses de calendario; el día se ajusta al último día del mes destino
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    }
}

/// Sumar años de calendario; el 29 de febrero pasa a 28 en años no bisiestos
pub fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    years.checked_mul(12).and_then(|months| add_months(date, months))
}

/// Días de calendario entre hoy y `date`; negativo significa vencido
pub fn days_from_today(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(ymd(2024, 1, 31), 1), Some(ymd(2024, 2, 29)));
        assert_eq!(add_months(ymd(2023, 1, 31), 1), Some(ymd(2023, 2, 28)));
        assert_eq!(add_months(ymd(2024, 3, 31), 6), Some(ymd(2024, 9, 30)));
        assert_eq!(add_months(ymd(2024, 1, 15), 12), Some(ymd(2025, 1, 15)));
    }

    #[test]
    fn test_add_months_negative() {
        assert_eq!(add_months(ymd(2024, 3, 31), -1), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn test_add_years_leap_day() {
        assert_eq!(add_years(ymd(2024, 2, 29), 1), Some(ymd(2025, 2, 28)));
        assert_eq!(add_years(ymd(2024, 2, 29), 4), Some(ymd(2028, 2, 29)));
        assert_eq!(add_years(ymd(2015, 3, 10), 10), Some(ymd(2025, 3, 10)));
    }

    #[test]
    fn test_add_years_overflow_is_none() {
        assert_eq!(add_years(ymd(2024, 1, 1), i32::MAX), None);
    }

    #[test]
    fn test_days_from_today_sign() {
        let today = ymd(2025, 3, 15);
        assert_eq!(days_from_today(ymd(2025, 3, 10), today), -5);
        assert_eq!(days_from_today(ymd(2025, 3, 15), today), 0);
        assert_eq!(days_from_today(ymd(2025, 3, 20), today), 5);
    }

    #[test]
    fn test_days_from_today_decreases_one_per_day() {
        let due = ymd(2025, 1, 1);
        let mut today = ymd(2024, 12, 1);
        let mut previous = days_from_today(due, today);
        for _ in 0..60 {
            today = today.succ_opt().unwrap();
            let current = days_from_today(due, today);
            assert_eq!(current, previous - 1);
            previous = current;
        }
    }

    #[test]
    fn test_parse_flexible_date_formats() {
        assert_eq!(parse_flexible_date("2024-01-15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_flexible_date(" 2024-01-15 "), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_flexible_date("2024-01-15T00:00:00.000Z"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_flexible_date("2024-01-15T10:30:00"), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_parse_flexible_date_rejects_garbage() {
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("   "), None);
        assert_eq!(parse_flexible_date("not a date"), None);
        assert_eq!(parse_flexible_date("2024-02-30"), None);
        assert_eq!(parse_flexible_date("15.01.2024."), None);
    }

    #[test]
    fn test_date_input_from_json() {
        let parsed: DateInput = serde_json::from_str("\"2024-06-01\"").unwrap();
        assert_eq!(parsed, DateInput::Parsed(ymd(2024, 6, 1)));

        let absent: DateInput = serde_json::from_str("null").unwrap();
        assert_eq!(absent, DateInput::Absent);

        let empty: DateInput = serde_json::from_str("\"\"").unwrap();
        assert_eq!(empty, DateInput::Absent);

        let garbage: DateInput = serde_json::from_str("\"yesterday\"").unwrap();
        assert_eq!(garbage, DateInput::Unparsed("yesterday".to_string()));

        let number: DateInput = serde_json::from_str("20240601").unwrap();
        assert!(number.is_unparsed());
        assert_eq!(number.date(), None);
    }

    #[test]
    fn test_date_input_serializes_as_iso() {
        let value = serde_json::to_value(DateInput::Parsed(ymd(2024, 6, 1))).unwrap();
        assert_eq!(value, serde_json::json!("2024-06-01"));
        assert_eq!(serde_json::to_value(DateInput::Absent).unwrap(), serde_json::Value::Null);
    }
}
