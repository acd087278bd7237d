//! Well-known scalar types
//!
//! Scalars are recognised by simple name. Qualified names only count when
//! they live in a `java.` or `javax.` package, so a user type called
//! `com.acme.Date` is not mistaken for a timestamp.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Broad family of a scalar type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarKind {
    Integer,
    Decimal,
    Boolean,
    Char,
    Text,
    Date,
    Time,
    DateTime,
}

/// Whether a scalar is a language primitive or its boxed/library counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarForm {
    Primitive,
    Boxed,
}

impl ScalarKind {
    /// Look up a primitive type name (`int`, `boolean`, ...)
    pub fn primitive(name: &str) -> Option<Self> {
        match name {
            "byte" | "short" | "int" | "long" => Some(Self::Integer),
            "float" | "double" => Some(Self::Decimal),
            "boolean" => Some(Self::Boolean),
            "char" => Some(Self::Char),
            _ => None,
        }
    }

    /// Look up a boxed or well-known library scalar (`Integer`, `java.lang.String`, ...)
    pub fn boxed(name: &str) -> Option<Self> {
        let simple = match name.rsplit_once('.') {
            Some((package, simple)) if package.starts_with("java") => simple,
            Some(_) => return None,
            None => name,
        };
        match simple {
            "Byte" | "Short" | "Integer" | "Long" | "BigInteger" | "AtomicInteger"
            | "AtomicLong" => Some(Self::Integer),
            "Float" | "Double" | "BigDecimal" | "Number" => Some(Self::Decimal),
            "Boolean" | "AtomicBoolean" => Some(Self::Boolean),
            "Character" => Some(Self::Char),
            "String" | "CharSequence" | "StringBuilder" | "UUID" => Some(Self::Text),
            "LocalDate" => Some(Self::Date),
            "LocalTime" | "Time" => Some(Self::Time),
            "Date" | "Timestamp" | "LocalDateTime" | "ZonedDateTime" | "OffsetDateTime"
            | "Instant" => Some(Self::DateTime),
            _ => None,
        }
    }

    /// Classify a type name as primitive or boxed scalar
    pub fn of(name: &str) -> Option<(Self, ScalarForm)> {
        Self::primitive(name)
            .map(|kind| (kind, ScalarForm::Primitive))
            .or_else(|| Self::boxed(name).map(|kind| (kind, ScalarForm::Boxed)))
    }

    /// Representative sample value used in generated examples
    pub fn sample(self) -> Value {
        match self {
            Self::Integer => Value::from(0),
            Self::Decimal => Value::from(0.0),
            Self::Boolean => Value::Bool(false),
            Self::Char | Self::Text => Value::String(String::new()),
            Self::Date => Value::String("2024-01-01".to_string()),
            Self::Time => Value::String("00:00:00".to_string()),
            Self::DateTime => Value::String("2024-01-01 00:00:00".to_string()),
        }
    }

    /// Interpret an explicit example string as a value of this kind
    ///
    /// Falls back to a JSON string when the text does not parse, or parses
    /// to a float JSON cannot hold (`NaN`, `inf`).
    pub fn parse_example(self, text: &str) -> Value {
        let parsed = match self {
            Self::Integer => text.trim().parse::<i64>().ok().map(Value::from),
            Self::Decimal => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .map(Value::from),
            Self::Boolean => text.trim().parse::<bool>().ok().map(Value::Bool),
            _ => None,
        };
        parsed.unwrap_or_else(|| Value::String(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_before_boxed() {
        assert_eq!(
            ScalarKind::of("int"),
            Some((ScalarKind::Integer, ScalarForm::Primitive))
        );
        assert_eq!(
            ScalarKind::of("Integer"),
            Some((ScalarKind::Integer, ScalarForm::Boxed))
        );
        assert_eq!(ScalarKind::of("Order"), None);
    }

    #[test]
    fn test_qualified_names() {
        assert_eq!(ScalarKind::boxed("java.lang.String"), Some(ScalarKind::Text));
        assert_eq!(ScalarKind::boxed("java.sql.Timestamp"), Some(ScalarKind::DateTime));
        assert_eq!(ScalarKind::boxed("com.acme.Date"), None);
    }

    #[test]
    fn test_samples() {
        assert_eq!(ScalarKind::Integer.sample(), Value::from(0));
        assert_eq!(ScalarKind::Text.sample(), Value::String(String::new()));
        assert_eq!(ScalarKind::Boolean.sample(), Value::Bool(false));
    }

    #[test]
    fn test_parse_example() {
        assert_eq!(ScalarKind::Integer.parse_example("42"), Value::from(42));
        assert_eq!(ScalarKind::Boolean.parse_example("true"), Value::Bool(true));
        assert_eq!(
            ScalarKind::Integer.parse_example("n/a"),
            Value::String("n/a".to_string())
        );
        assert_eq!(ScalarKind::Decimal.parse_example("1.5"), Value::from(1.5));
    }

    #[test]
    fn test_parse_example_non_finite_decimal_stays_text() {
        for text in ["NaN", "inf", "-infinity"] {
            assert_eq!(
                ScalarKind::Decimal.parse_example(text),
                Value::String(text.to_string())
            );
        }
    }
}
