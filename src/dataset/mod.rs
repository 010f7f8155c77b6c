//! Immutable, explicitly typed tabular data.
//!
//! A [`Dataset`] is validated once, when it is built: every row has one value
//! per attribute and every value either matches its attribute's declared kind
//! or is [`Value::Missing`]. After that nothing mutates it; [`Dataset::head`]
//! and friends return new snapshots.
//!
//! ```
//! use descry::dataset::{Dataset, Schema, Value};
//!
//! let schema = Schema::builder().numeric("a").categorical("b").build()?;
//! let ds = Dataset::new(
//!     schema,
//!     vec![
//!         vec![Value::from(1.0), Value::from("x")],
//!         vec![Value::from(2.0), Value::from("y")],
//!         vec![Value::Missing, Value::from("x")],
//!     ],
//! )?;
//! assert_eq!(ds.shape(), (3, 2));
//! # Ok::<(), descry::error::DescryError>(())
//! ```

pub mod column;
pub mod schema;
pub mod value;

pub use column::ColumnData;
pub use schema::{Attribute, AttributeKind, Schema, SchemaBuilder};
pub use value::Value;

use crate::error::{DescryError, Result};
use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

#[derive(Clone, PartialEq, Debug)]
pub struct Dataset {
    schema: Schema,
    columns: Vec<ColumnData>,
    row_count: usize,
}

impl Dataset {
    /// Builds a dataset from rows given in schema order.
    ///
    /// # Errors
    ///
    /// Returns [`DescryError::InvalidDataset`] if a row has the wrong width, a
    /// value does not match its attribute's kind, a numeric value is NaN, or a
    /// categorical value is outside the attribute's declared levels.
    pub fn new<R, V>(schema: Schema, rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut builder = DatasetBuilder::new(schema);
        for row in rows {
            builder.push_row(row)?;
        }
        Ok(builder.build())
    }

    /// A dataset with the given schema and no rows.
    pub fn empty(schema: Schema) -> Self {
        DatasetBuilder::new(schema).build()
    }

    pub fn builder(schema: Schema) -> DatasetBuilder {
        DatasetBuilder::new(schema)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count, self.column_count())
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// # Errors
    ///
    /// Returns [`DescryError::SchemaMismatch`] for unknown names.
    pub fn column(&self, name: &str) -> Result<&ColumnData> {
        let attr = self.schema.require(name)?;
        self.columns
            .get(attr.position)
            .ok_or_else(|| DescryError::SchemaMismatch {
                attribute: name.to_owned(),
            })
    }

    pub fn columns(&self) -> impl Iterator<Item = (&Attribute, &ColumnData)> {
        self.schema.attributes().iter().zip(&self.columns)
    }

    /// The values of a numeric attribute, missing values as `None`.
    ///
    /// # Errors
    ///
    /// `SchemaMismatch` for unknown names, `TypeMismatch` for categorical attributes.
    pub fn numeric(&self, name: &str) -> Result<&[Option<f64>]> {
        match self.column(name)? {
            ColumnData::Numeric(values) => Ok(values),
            other => Err(DescryError::TypeMismatch {
                attribute: name.to_owned(),
                expected: AttributeKind::Numeric,
                actual: other.kind(),
            }),
        }
    }

    /// The column of a categorical attribute.
    ///
    /// # Errors
    ///
    /// `SchemaMismatch` for unknown names, `TypeMismatch` for numeric attributes.
    pub fn categorical(&self, name: &str) -> Result<&ColumnData> {
        let column = self.column(name)?;
        match column.kind() {
            AttributeKind::Categorical => Ok(column),
            actual => Err(DescryError::TypeMismatch {
                attribute: name.to_owned(),
                expected: AttributeKind::Categorical,
                actual,
            }),
        }
    }

    pub fn row(&self, index: usize) -> Option<Vec<Value>> {
        if index >= self.row_count {
            return None;
        }
        self.columns.iter().map(|c| c.value(index)).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.row_count).filter_map(|i| self.row(i))
    }

    /// The first `min(n, rows)` rows as a new dataset with the same schema.
    pub fn head(&self, n: usize) -> Self {
        let take = n.min(self.row_count);
        Self {
            schema: self.schema.clone(),
            columns: self.columns.iter().map(|c| c.head(take)).collect(),
            row_count: take,
        }
    }

    /// Resolves a selection to numeric attributes, in selection order.
    ///
    /// # Errors
    ///
    /// `SchemaMismatch` for unknown names or out-of-range positions,
    /// `TypeMismatch` when a named or positioned attribute is categorical.
    pub fn resolve_numeric(&self, selection: &ColumnSelection) -> Result<Vec<&Attribute>> {
        let attrs: Vec<&Attribute> = match selection {
            ColumnSelection::AllNumeric => return Ok(self.schema.numeric_attributes().collect()),
            ColumnSelection::Named(names) => names
                .iter()
                .map(|n| self.schema.require(n))
                .collect::<Result<_>>()?,
            ColumnSelection::Range(range) => range
                .clone()
                .map(|pos| {
                    self.schema
                        .attributes()
                        .get(pos)
                        .ok_or_else(|| DescryError::SchemaMismatch {
                            attribute: format!("#{pos}"),
                        })
                })
                .collect::<Result<_>>()?,
        };

        if let Some(bad) = attrs.iter().find(|a| !a.is_numeric()) {
            return Err(DescryError::TypeMismatch {
                attribute: bad.name.clone(),
                expected: AttributeKind::Numeric,
                actual: bad.kind,
            });
        }
        Ok(attrs)
    }
}

/// Which numeric attributes a vector or matrix operation covers.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub enum ColumnSelection {
    /// Every numeric attribute, in schema order.
    #[default]
    AllNumeric,
    Named(Vec<String>),
    /// Zero-based, end-exclusive positions.
    Range(Range<usize>),
}

impl ColumnSelection {
    pub fn named<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::Named(names.into_iter().map(Into::into).collect())
    }
}

enum Buffer {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

/// Accumulates validated rows, then freezes them into a [`Dataset`].
pub struct DatasetBuilder {
    schema: Schema,
    buffers: Vec<Buffer>,
    rows: usize,
}

impl DatasetBuilder {
    pub fn new(schema: Schema) -> Self {
        let buffers = schema
            .attributes()
            .iter()
            .map(|a| match a.kind {
                AttributeKind::Numeric => Buffer::Numeric(Vec::new()),
                AttributeKind::Categorical => Buffer::Categorical(Vec::new()),
            })
            .collect();
        Self {
            schema,
            buffers,
            rows: 0,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Validates and appends one row. A rejected row leaves the builder unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DescryError::InvalidDataset`] describing the offending value.
    pub fn push_row<V: Into<Value>>(&mut self, row: impl IntoIterator<Item = V>) -> Result<()> {
        let values: Vec<Value> = row.into_iter().map(Into::into).collect();
        if values.len() != self.schema.len() {
            return Err(DescryError::InvalidDataset(format!(
                "row {} has {} values, schema has {} attributes",
                self.rows,
                values.len(),
                self.schema.len()
            )));
        }
        for (attr, value) in self.schema.attributes().iter().zip(&values) {
            check_value(self.rows, attr, value)?;
        }

        for (buffer, value) in self.buffers.iter_mut().zip(values) {
            match (buffer, value) {
                (Buffer::Numeric(col), Value::Numeric(v)) => col.push(Some(v)),
                (Buffer::Categorical(col), Value::Categorical(s)) => col.push(Some(s)),
                (Buffer::Numeric(col), _) => col.push(None),
                (Buffer::Categorical(col), _) => col.push(None),
            }
        }
        self.rows += 1;
        Ok(())
    }

    pub fn build(self) -> Dataset {
        let columns = self
            .schema
            .attributes()
            .iter()
            .zip(self.buffers)
            .map(|(attr, buffer)| match buffer {
                Buffer::Numeric(values) => ColumnData::Numeric(values),
                Buffer::Categorical(values) => {
                    let levels = attr.levels.clone().unwrap_or_else(|| {
                        values
                            .iter()
                            .flatten()
                            .map(String::as_str)
                            .collect::<BTreeSet<_>>()
                            .into_iter()
                            .map(str::to_owned)
                            .collect()
                    });
                    let codes = {
                        let index: HashMap<&str, usize> = levels
                            .iter()
                            .enumerate()
                            .map(|(i, l)| (l.as_str(), i))
                            .collect();
                        values
                            .iter()
                            .map(|v| v.as_deref().and_then(|s| index.get(s).copied()))
                            .collect()
                    };
                    ColumnData::Categorical { levels, codes }
                }
            })
            .collect();

        Dataset {
            schema: self.schema,
            columns,
            row_count: self.rows,
        }
    }
}

fn check_value(row: usize, attr: &Attribute, value: &Value) -> Result<()> {
    match (attr.kind, value) {
        (_, Value::Missing) => Ok(()),
        (AttributeKind::Numeric, Value::Numeric(v)) => {
            if v.is_nan() {
                Err(DescryError::InvalidDataset(format!(
                    "row {row}, attribute '{}': NaN is not a value; use Missing",
                    attr.name
                )))
            } else {
                Ok(())
            }
        }
        (AttributeKind::Categorical, Value::Categorical(label)) => match &attr.levels {
            Some(levels) if !levels.contains(label) => Err(DescryError::InvalidDataset(format!(
                "row {row}, attribute '{}': '{label}' is not a declared level",
                attr.name
            ))),
            _ => Ok(()),
        },
        (expected, other) => Err(DescryError::InvalidDataset(format!(
            "row {row}, attribute '{}': expected {expected} value, got {other:?}",
            attr.name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Result<Dataset> {
        let schema = Schema::builder().numeric("a").categorical("b").build()?;
        Dataset::new(
            schema,
            vec![
                vec![Value::from(1.0), Value::from("x")],
                vec![Value::from(2.0), Value::from("y")],
                vec![Value::from(3.0), Value::from("x")],
            ],
        )
    }

    #[test]
    fn test_shape_and_rows() -> Result<()> {
        let ds = sample()?;
        assert_eq!(ds.shape(), (3, 2));
        assert_eq!(
            ds.row(1),
            Some(vec![Value::from(2.0), Value::from("y")])
        );
        assert_eq!(ds.row(3), None);
        assert_eq!(ds.rows().count(), 3);
        Ok(())
    }

    #[test]
    fn test_levels_sorted_when_undeclared() -> Result<()> {
        let schema = Schema::builder().categorical("b").build()?;
        let ds = Dataset::new(schema, vec![vec!["pos"], vec!["neg"], vec!["pos"]])?;
        let ColumnData::Categorical { levels, codes } = ds.column("b")? else {
            panic!("expected categorical column");
        };
        assert_eq!(levels, &vec!["neg".to_owned(), "pos".to_owned()]);
        assert_eq!(codes, &vec![Some(1), Some(0), Some(1)]);
        Ok(())
    }

    #[test]
    fn test_declared_levels_enforced() -> Result<()> {
        let schema = Schema::builder().factor("b", ["lo", "hi"]).build()?;
        let result = Dataset::new(schema, vec![vec!["lo"], vec!["mid"]]);
        assert!(matches!(result, Err(DescryError::InvalidDataset(_))));
        Ok(())
    }

    #[test]
    fn test_wrong_width_rejected() -> Result<()> {
        let schema = Schema::builder().numeric("a").numeric("b").build()?;
        let result = Dataset::new(schema, vec![vec![1.0]]);
        assert!(matches!(result, Err(DescryError::InvalidDataset(_))));
        Ok(())
    }

    #[test]
    fn test_wrong_kind_rejected() -> Result<()> {
        let schema = Schema::builder().numeric("a").build()?;
        let result = Dataset::new(schema, vec![vec![Value::from("1")]]);
        assert!(matches!(result, Err(DescryError::InvalidDataset(_))));
        Ok(())
    }

    #[test]
    fn test_nan_rejected() -> Result<()> {
        let schema = Schema::builder().numeric("a").build()?;
        let result = Dataset::new(schema, vec![vec![f64::NAN]]);
        assert!(matches!(result, Err(DescryError::InvalidDataset(_))));
        Ok(())
    }

    #[test]
    fn test_rejected_row_leaves_builder_unchanged() -> Result<()> {
        let schema = Schema::builder().numeric("a").categorical("b").build()?;
        let mut builder = Dataset::builder(schema);
        builder.push_row([Value::from(1.0), Value::from("x")])?;
        assert!(builder.push_row([Value::from(2.0), Value::from(3.0)]).is_err());
        let ds = builder.build();
        assert_eq!(ds.row_count(), 1);
        assert_eq!(ds.numeric("a")?, &[Some(1.0)]);
        Ok(())
    }

    #[test]
    fn test_head_clamps() -> Result<()> {
        let ds = sample()?;
        assert_eq!(ds.head(0).row_count(), 0);
        assert_eq!(ds.head(2).row_count(), 2);
        assert_eq!(ds.head(50), ds);
        Ok(())
    }

    #[test]
    fn test_typed_accessors() -> Result<()> {
        let ds = sample()?;
        assert!(ds.numeric("a").is_ok());
        assert!(matches!(
            ds.numeric("b"),
            Err(DescryError::TypeMismatch { .. })
        ));
        assert!(matches!(
            ds.categorical("a"),
            Err(DescryError::TypeMismatch { .. })
        ));
        assert!(matches!(
            ds.numeric("zzz"),
            Err(DescryError::SchemaMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_resolve_numeric_selection() -> Result<()> {
        let ds = sample()?;
        let all = ds.resolve_numeric(&ColumnSelection::AllNumeric)?;
        assert_eq!(all.len(), 1);

        let by_range = ds.resolve_numeric(&ColumnSelection::Range(0..1))?;
        assert_eq!(by_range.first().map(|a| a.name.as_str()), Some("a"));

        assert!(matches!(
            ds.resolve_numeric(&ColumnSelection::Range(0..2)),
            Err(DescryError::TypeMismatch { .. })
        ));
        assert!(matches!(
            ds.resolve_numeric(&ColumnSelection::Range(0..5)),
            Err(DescryError::SchemaMismatch { .. })
        ));
        assert!(matches!(
            ds.resolve_numeric(&ColumnSelection::named(["nope"])),
            Err(DescryError::SchemaMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_dataset_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dataset>();
    }
}
