use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell. Missing values are their own variant, never a sentinel.
#[derive(Clone, Deserialize, Serialize, PartialEq, Debug, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Missing,
    Numeric(f64),
    Categorical(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "NA"),
            Self::Numeric(v) => write!(f, "{v}"),
            Self::Categorical(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Numeric(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Numeric(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Categorical(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Categorical(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Missing, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_conversion_tags_missing() {
        assert_eq!(Value::from(None::<f64>), Value::Missing);
        assert_eq!(Value::from(Some(2.5)), Value::Numeric(2.5));
        assert_eq!(Value::from(Some("x")), Value::Categorical("x".to_owned()));
    }

    #[test]
    fn test_json_shape() -> crate::error::Result<()> {
        let row = vec![Value::from(1.5), Value::from("setosa"), Value::Missing];
        assert_eq!(serde_json::to_string(&row)?, r#"[1.5,"setosa",null]"#);
        Ok(())
    }
}
