//! The descriptive summary engine.
//!
//! Eight independent views over one [`Dataset`](crate::dataset::Dataset):
//!
//! | view | method |
//! |---|---|
//! | first rows | [`SummaryEngine::peek`] |
//! | row/column counts | [`SummaryEngine::shape`] |
//! | attribute types | [`SummaryEngine::type_map`] |
//! | label counts and shares | [`SummaryEngine::class_distribution`] |
//! | per-attribute summary | [`SummaryEngine::summary_table`] |
//! | standard deviations | [`SummaryEngine::std_dev_vector`] |
//! | skewness | [`SummaryEngine::skewness_vector`] |
//! | correlation matrix | [`SummaryEngine::correlation_matrix`] |
//!
//! ```
//! use descry::dataset::{ColumnSelection, Dataset, Schema, Value};
//! use descry::summary::SummaryEngine;
//!
//! let schema = Schema::builder().numeric("a").categorical("b").build()?;
//! let ds = Dataset::new(
//!     schema,
//!     vec![
//!         vec![Value::from(1.0), Value::from("x")],
//!         vec![Value::from(2.0), Value::from("y")],
//!         vec![Value::from(3.0), Value::from("x")],
//!     ],
//! )?;
//! let engine = SummaryEngine::new(&ds);
//!
//! let classes = engine.class_distribution("b")?;
//! assert_eq!(classes.get("x").map(|c| c.count), Some(2));
//!
//! let sd = engine.std_dev_vector(&ColumnSelection::named(["a"]))?;
//! assert_eq!(sd.get("a"), Some(1.0));
//! # Ok::<(), descry::error::DescryError>(())
//! ```

pub mod engine;
pub mod render;
pub mod types;

pub use engine::SummaryEngine;
pub use render::{render, render_report};
pub use types::{
    AttributeStats, AttributeSummary, CategoricalSummary, ClassDistribution, ClassShare,
    CorrelationMatrix, LevelCount, NamedValue, NumericSummary, Preview, ReportEntry, Shape,
    SkewnessVector, StdDevVector, SummaryKind, SummaryRequest, SummaryResult, SummaryTable,
    TypeEntry, TypeMap,
};
