//! Column-major storage.
//!
//! The variant of [`ColumnData`] always matches the attribute's declared kind,
//! which is what lets the summary operations skip per-value type checks.

use super::schema::AttributeKind;
use super::value::Value;

#[derive(Clone, PartialEq, Debug)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    /// Factor representation: a level table plus one code per row.
    Categorical {
        levels: Vec<String>,
        codes: Vec<Option<usize>>,
    },
}

impl ColumnData {
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Numeric(_) => AttributeKind::Numeric,
            Self::Categorical { .. } => AttributeKind::Categorical,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Categorical { codes, .. } => codes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn missing_count(&self) -> usize {
        match self {
            Self::Numeric(values) => values.iter().filter(|v| v.is_none()).count(),
            Self::Categorical { codes, .. } => codes.iter().filter(|c| c.is_none()).count(),
        }
    }

    pub fn value(&self, row: usize) -> Option<Value> {
        match self {
            Self::Numeric(values) => values.get(row).map(|v| Value::from(*v)),
            Self::Categorical { levels, codes } => codes.get(row).map(|&code| {
                code.and_then(|c| levels.get(c))
                    .map_or(Value::Missing, |l| Value::Categorical(l.clone()))
            }),
        }
    }

    /// Copies the first `n` rows. Categorical columns keep their full level table.
    pub fn head(&self, n: usize) -> Self {
        match self {
            Self::Numeric(values) => Self::Numeric(values.iter().take(n).copied().collect()),
            Self::Categorical { levels, codes } => Self::Categorical {
                levels: levels.clone(),
                codes: codes.iter().take(n).copied().collect(),
            },
        }
    }

    /// Non-missing numeric values in row order; `None` for categorical columns.
    pub fn present_values(&self) -> Option<Vec<f64>> {
        match self {
            Self::Numeric(values) => Some(values.iter().flatten().copied().collect()),
            Self::Categorical { .. } => None,
        }
    }

    /// Per-level counts in level order, zero-count levels included.
    pub fn level_counts(&self) -> Option<Vec<(String, usize)>> {
        match self {
            Self::Numeric(_) => None,
            Self::Categorical { levels, codes } => {
                let mut counts = vec![0_usize; levels.len()];
                for code in codes.iter().flatten() {
                    if let Some(count) = counts.get_mut(*code) {
                        *count += 1;
                    }
                }
                Some(levels.iter().cloned().zip(counts).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species() -> ColumnData {
        ColumnData::Categorical {
            levels: vec!["setosa".to_owned(), "versicolor".to_owned(), "virginica".to_owned()],
            codes: vec![Some(0), Some(2), None, Some(0)],
        }
    }

    #[test]
    fn test_level_counts_include_zero_levels() {
        let counts = species().level_counts().expect("categorical");
        assert_eq!(
            counts,
            vec![
                ("setosa".to_owned(), 2),
                ("versicolor".to_owned(), 0),
                ("virginica".to_owned(), 1),
            ]
        );
    }

    #[test]
    fn test_missing_count_and_values() {
        let col = species();
        assert_eq!(col.missing_count(), 1);
        assert_eq!(col.value(1), Some(Value::from("virginica")));
        assert_eq!(col.value(2), Some(Value::Missing));
        assert_eq!(col.value(9), None);
    }

    #[test]
    fn test_head_keeps_levels() {
        let head = species().head(1);
        assert_eq!(head.len(), 1);
        let counts = head.level_counts().expect("categorical");
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_present_values_skip_missing() {
        let col = ColumnData::Numeric(vec![Some(1.0), None, Some(3.0)]);
        assert_eq!(col.present_values(), Some(vec![1.0, 3.0]));
        assert_eq!(col.kind(), AttributeKind::Numeric);
        assert!(species().present_values().is_none());
    }
}
