use crate::dataset::{AttributeKind, ColumnSelection, Value};
use crate::stats::{CorrelationMethod, SkewnessKind};
use serde::Serialize;

/// First rows of a dataset, in insertion order.
#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Preview {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Clone, Copy, Serialize, PartialEq, Eq, Debug)]
pub struct Shape {
    pub rows: usize,
    pub columns: usize,
}

#[derive(Clone, Serialize, PartialEq, Eq, Debug)]
pub struct TypeEntry {
    pub name: String,
    pub kind: AttributeKind,
}

/// Declared type of every attribute, in schema order.
#[derive(Clone, Serialize, PartialEq, Eq, Debug)]
pub struct TypeMap {
    pub attributes: Vec<TypeEntry>,
}

impl TypeMap {
    pub fn get(&self, name: &str) -> Option<AttributeKind> {
        self.attributes.iter().find(|e| e.name == name).map(|e| e.kind)
    }
}

#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct ClassShare {
    pub label: String,
    pub count: usize,
    /// `100 * count / observed`, where `observed` excludes missing labels.
    pub percentage: f64,
}

#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct ClassDistribution {
    pub attribute: String,
    /// Observed labels only, in level order.
    pub classes: Vec<ClassShare>,
    pub missing: usize,
}

impl ClassDistribution {
    pub fn get(&self, label: &str) -> Option<&ClassShare> {
        self.classes.iter().find(|c| c.label == label)
    }

    pub fn observed(&self) -> usize {
        self.classes.iter().map(|c| c.count).sum()
    }
}

/// Six-number summary of a numeric attribute. Every statistic is `None` when
/// the attribute has no present values.
#[derive(Clone, Copy, Default, Serialize, PartialEq, Debug)]
pub struct NumericSummary {
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub mean: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
    pub missing: usize,
}

#[derive(Clone, Serialize, PartialEq, Eq, Debug)]
pub struct LevelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Clone, Default, Serialize, PartialEq, Eq, Debug)]
pub struct CategoricalSummary {
    /// Every level, zero counts included.
    pub levels: Vec<LevelCount>,
    pub missing: usize,
}

#[derive(Clone, Serialize, PartialEq, Debug)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AttributeStats {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

impl AttributeStats {
    pub fn missing(&self) -> usize {
        match self {
            Self::Numeric(s) => s.missing,
            Self::Categorical(s) => s.missing,
        }
    }
}

#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct AttributeSummary {
    pub name: String,
    pub stats: AttributeStats,
}

#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct SummaryTable {
    pub row_count: usize,
    pub attributes: Vec<AttributeSummary>,
}

impl SummaryTable {
    pub fn get(&self, name: &str) -> Option<&AttributeStats> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.stats)
    }
}

#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct NamedValue {
    pub attribute: String,
    pub value: f64,
}

fn lookup(values: &[NamedValue], name: &str) -> Option<f64> {
    values.iter().find(|v| v.attribute == name).map(|v| v.value)
}

/// Sample standard deviations (`n - 1` denominator).
#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct StdDevVector {
    pub values: Vec<NamedValue>,
}

impl StdDevVector {
    pub fn get(&self, name: &str) -> Option<f64> {
        lookup(&self.values, name)
    }
}

#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct SkewnessVector {
    pub kind: SkewnessKind,
    pub values: Vec<NamedValue>,
}

impl SkewnessVector {
    pub fn get(&self, name: &str) -> Option<f64> {
        lookup(&self.values, name)
    }
}

/// Symmetric matrix over `columns`; undefined entries are NaN (JSON `null`).
#[derive(Clone, Serialize, PartialEq, Debug)]
pub struct CorrelationMatrix {
    pub method: CorrelationMethod,
    pub columns: Vec<String>,
    pub data: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == row)?;
        let j = self.columns.iter().position(|c| c == col)?;
        self.data.get(i)?.get(j).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[derive(Clone, Copy, Serialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    Peek,
    Shape,
    TypeMap,
    ClassDistribution,
    SummaryTable,
    StdDevVector,
    SkewnessVector,
    CorrelationMatrix,
}

impl SummaryKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Peek => "Peek",
            Self::Shape => "Shape",
            Self::TypeMap => "Attribute types",
            Self::ClassDistribution => "Class distribution",
            Self::SummaryTable => "Summary",
            Self::StdDevVector => "Standard deviation",
            Self::SkewnessVector => "Skewness",
            Self::CorrelationMatrix => "Correlation",
        }
    }
}

/// One of the eight descriptive views.
#[derive(Clone, Serialize, PartialEq, Debug)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum SummaryResult {
    Peek(Preview),
    Shape(Shape),
    TypeMap(TypeMap),
    ClassDistribution(ClassDistribution),
    SummaryTable(SummaryTable),
    StdDevVector(StdDevVector),
    SkewnessVector(SkewnessVector),
    CorrelationMatrix(CorrelationMatrix),
}

impl SummaryResult {
    pub fn kind(&self) -> SummaryKind {
        match self {
            Self::Peek(_) => SummaryKind::Peek,
            Self::Shape(_) => SummaryKind::Shape,
            Self::TypeMap(_) => SummaryKind::TypeMap,
            Self::ClassDistribution(_) => SummaryKind::ClassDistribution,
            Self::SummaryTable(_) => SummaryKind::SummaryTable,
            Self::StdDevVector(_) => SummaryKind::StdDevVector,
            Self::SkewnessVector(_) => SummaryKind::SkewnessVector,
            Self::CorrelationMatrix(_) => SummaryKind::CorrelationMatrix,
        }
    }
}

/// A summary to compute, with its parameters.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SummaryRequest {
    Peek { rows: usize },
    Shape,
    TypeMap,
    ClassDistribution { label: String },
    SummaryTable,
    StdDev { columns: ColumnSelection },
    /// `kind: None` uses the engine's configured convention.
    Skewness {
        columns: ColumnSelection,
        kind: Option<SkewnessKind>,
    },
    Correlation {
        columns: ColumnSelection,
        method: Option<CorrelationMethod>,
    },
}

impl SummaryRequest {
    pub fn kind(&self) -> SummaryKind {
        match self {
            Self::Peek { .. } => SummaryKind::Peek,
            Self::Shape => SummaryKind::Shape,
            Self::TypeMap => SummaryKind::TypeMap,
            Self::ClassDistribution { .. } => SummaryKind::ClassDistribution,
            Self::SummaryTable => SummaryKind::SummaryTable,
            Self::StdDev { .. } => SummaryKind::StdDevVector,
            Self::Skewness { .. } => SummaryKind::SkewnessVector,
            Self::Correlation { .. } => SummaryKind::CorrelationMatrix,
        }
    }
}

/// Outcome of one view within a full report.
#[derive(Debug)]
pub struct ReportEntry {
    pub kind: SummaryKind,
    pub outcome: crate::error::Result<SummaryResult>,
}
