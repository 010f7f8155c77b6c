use super::types::{
    AttributeStats, AttributeSummary, CategoricalSummary, ClassDistribution, ClassShare,
    CorrelationMatrix, LevelCount, NamedValue, NumericSummary, Preview, ReportEntry, Shape,
    SkewnessVector, StdDevVector, SummaryRequest, SummaryResult, SummaryTable,
    TypeEntry, TypeMap,
};
use crate::config::EngineConfig;
use crate::dataset::{Attribute, AttributeKind, ColumnData, ColumnSelection, Dataset};
use crate::error::{DescryError, Result};
use crate::stats::{self, CorrelationMethod, SkewnessKind};

/// Computes descriptive views of one dataset.
///
/// The engine only reads the dataset; every method can be called any number
/// of times, in any order, from any number of threads.
pub struct SummaryEngine<'a> {
    dataset: &'a Dataset,
    config: EngineConfig,
}

impl<'a> SummaryEngine<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self::with_config(dataset, EngineConfig::default())
    }

    pub fn with_config(dataset: &'a Dataset, config: EngineConfig) -> Self {
        Self { dataset, config }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The first `min(n, rows)` rows in insertion order.
    pub fn peek(&self, n: usize) -> Preview {
        let head = self.dataset.head(n);
        tracing::debug!(requested = n, returned = head.row_count(), "peek");
        Preview {
            columns: self.dataset.schema().names().map(str::to_owned).collect(),
            rows: head.rows().collect(),
        }
    }

    pub fn shape(&self) -> Shape {
        let (rows, columns) = self.dataset.shape();
        Shape { rows, columns }
    }

    pub fn type_map(&self) -> TypeMap {
        TypeMap {
            attributes: self
                .dataset
                .schema()
                .attributes()
                .iter()
                .map(|a| TypeEntry {
                    name: a.name.clone(),
                    kind: a.kind,
                })
                .collect(),
        }
    }

    /// Count and share of each observed label of a categorical attribute.
    ///
    /// Shares are taken over the non-missing labels, so they sum to 100
    /// whenever at least one label is present.
    ///
    /// # Errors
    ///
    /// `SchemaMismatch` if `label` is unknown, `TypeMismatch` if it is numeric.
    pub fn class_distribution(&self, label: &str) -> Result<ClassDistribution> {
        let column = self.dataset.categorical(label)?;
        let missing = column.missing_count();
        let counts = column.level_counts().unwrap_or_default();
        let observed: usize = counts.iter().map(|(_, c)| c).sum();

        let classes = counts
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(label, count)| ClassShare {
                label,
                count,
                percentage: 100.0 * count as f64 / observed as f64,
            })
            .collect::<Vec<_>>();

        tracing::debug!(attribute = label, classes = classes.len(), missing, "class distribution");
        Ok(ClassDistribution {
            attribute: label.to_owned(),
            classes,
            missing,
        })
    }

    /// Per-attribute summary. Never fails: attributes without present values
    /// report undefined statistics.
    pub fn summary_table(&self) -> SummaryTable {
        let attributes = self
            .dataset
            .columns()
            .map(|(attr, column)| AttributeSummary {
                name: attr.name.clone(),
                stats: summarise_column(column),
            })
            .collect();

        SummaryTable {
            row_count: self.dataset.row_count(),
            attributes,
        }
    }

    /// Sample standard deviation of each selected attribute.
    ///
    /// # Errors
    ///
    /// Selection errors (see [`Dataset::resolve_numeric`]) and
    /// `InsufficientData` when an attribute has fewer than two present values.
    pub fn std_dev_vector(&self, columns: &ColumnSelection) -> Result<StdDevVector> {
        let values = self
            .present_values(columns)?
            .into_iter()
            .map(|(attr, values)| -> Result<NamedValue> {
                let value = stats::std_dev(&values).ok_or_else(|| DescryError::InsufficientData {
                    attribute: attr.name.clone(),
                    required: 2,
                    actual: values.len(),
                })?;
                Ok(NamedValue {
                    attribute: attr.name.clone(),
                    value,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(attributes = values.len(), "standard deviation");
        Ok(StdDevVector { values })
    }

    /// Skewness with the configured convention.
    ///
    /// # Errors
    ///
    /// See [`Self::skewness_vector_with`].
    pub fn skewness_vector(&self, columns: &ColumnSelection) -> Result<SkewnessVector> {
        self.skewness_vector_with(columns, self.config.skewness)
    }

    /// Skewness of each selected attribute; constant attributes give `0.0`.
    ///
    /// # Errors
    ///
    /// Selection errors, and `InsufficientData` when an attribute has fewer
    /// present values than `kind` needs.
    pub fn skewness_vector_with(
        &self,
        columns: &ColumnSelection,
        kind: SkewnessKind,
    ) -> Result<SkewnessVector> {
        let values = self
            .present_values(columns)?
            .into_iter()
            .map(|(attr, values)| -> Result<NamedValue> {
                let value =
                    stats::skewness(&values, kind).ok_or_else(|| DescryError::InsufficientData {
                        attribute: attr.name.clone(),
                        required: kind.min_observations(),
                        actual: values.len(),
                    })?;
                Ok(NamedValue {
                    attribute: attr.name.clone(),
                    value,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(attributes = values.len(), %kind, "skewness");
        Ok(SkewnessVector { kind, values })
    }

    /// Correlation with the configured method.
    ///
    /// # Errors
    ///
    /// See [`Self::correlation_matrix_with`].
    pub fn correlation_matrix(&self, columns: &ColumnSelection) -> Result<CorrelationMatrix> {
        self.correlation_matrix_with(columns, self.config.correlation)
    }

    /// Pairwise-complete correlation matrix. Pairs with fewer than two complete
    /// rows, or with a constant side, are NaN. The diagonal is always `1.0`.
    ///
    /// # Errors
    ///
    /// Selection errors only.
    pub fn correlation_matrix_with(
        &self,
        columns: &ColumnSelection,
        method: CorrelationMethod,
    ) -> Result<CorrelationMatrix> {
        let attrs = self.dataset.resolve_numeric(columns)?;
        let series = attrs
            .iter()
            .map(|a| self.dataset.numeric(&a.name))
            .collect::<Result<Vec<_>>>()?;

        let n = series.len();
        let mut data = vec![vec![f64::NAN; n]; n];
        for (i, x) in series.iter().enumerate() {
            set_symmetric(&mut data, i, i, 1.0);
            for (j, y) in series.iter().enumerate().skip(i + 1) {
                let (xs, ys) = stats::pairwise_complete(x, y);
                set_symmetric(&mut data, i, j, stats::correlation(&xs, &ys, method));
            }
        }

        tracing::debug!(attributes = n, %method, "correlation matrix");
        Ok(CorrelationMatrix {
            method,
            columns: attrs.iter().map(|a| a.name.clone()).collect(),
            data,
        })
    }

    /// Executes a single request.
    ///
    /// # Errors
    ///
    /// Whatever the requested operation returns.
    pub fn run(&self, request: &SummaryRequest) -> Result<SummaryResult> {
        Ok(match request {
            SummaryRequest::Peek { rows } => SummaryResult::Peek(self.peek(*rows)),
            SummaryRequest::Shape => SummaryResult::Shape(self.shape()),
            SummaryRequest::TypeMap => SummaryResult::TypeMap(self.type_map()),
            SummaryRequest::ClassDistribution { label } => {
                SummaryResult::ClassDistribution(self.class_distribution(label)?)
            }
            SummaryRequest::SummaryTable => SummaryResult::SummaryTable(self.summary_table()),
            SummaryRequest::StdDev { columns } => {
                SummaryResult::StdDevVector(self.std_dev_vector(columns)?)
            }
            SummaryRequest::Skewness { columns, kind } => SummaryResult::SkewnessVector(
                self.skewness_vector_with(columns, kind.unwrap_or(self.config.skewness))?,
            ),
            SummaryRequest::Correlation { columns, method } => SummaryResult::CorrelationMatrix(
                self.correlation_matrix_with(columns, method.unwrap_or(self.config.correlation))?,
            ),
        })
    }

    /// The requests making up a full report, in walkthrough order.
    pub fn report_requests(&self, label: Option<&str>) -> Vec<SummaryRequest> {
        let mut requests = vec![
            SummaryRequest::Peek {
                rows: self.config.peek_rows,
            },
            SummaryRequest::Shape,
            SummaryRequest::TypeMap,
        ];
        if let Some(label) = label {
            requests.push(SummaryRequest::ClassDistribution {
                label: label.to_owned(),
            });
        }
        requests.extend([
            SummaryRequest::SummaryTable,
            SummaryRequest::StdDev {
                columns: ColumnSelection::AllNumeric,
            },
            SummaryRequest::Skewness {
                columns: ColumnSelection::AllNumeric,
                kind: None,
            },
            SummaryRequest::Correlation {
                columns: ColumnSelection::AllNumeric,
                method: None,
            },
        ]);
        requests
    }

    /// Runs every view. A failing view is reported in its entry and does not
    /// stop the others.
    pub fn report(&self, label: Option<&str>) -> Vec<ReportEntry> {
        self.report_requests(label)
            .iter()
            .map(|request| {
                let outcome = self.run(request);
                if let Err(e) = &outcome {
                    tracing::warn!("{} skipped: {e}", request.kind().title());
                }
                ReportEntry {
                    kind: request.kind(),
                    outcome,
                }
            })
            .collect()
    }

    fn present_values(&self, columns: &ColumnSelection) -> Result<Vec<(&'a Attribute, Vec<f64>)>> {
        self.dataset
            .resolve_numeric(columns)?
            .into_iter()
            .map(|attr| -> Result<(&'a Attribute, Vec<f64>)> {
                let column = self.dataset.column(&attr.name)?;
                let values = column
                    .present_values()
                    .ok_or_else(|| DescryError::TypeMismatch {
                        attribute: attr.name.clone(),
                        expected: AttributeKind::Numeric,
                        actual: column.kind(),
                    })?;
                Ok((attr, values))
            })
            .collect()
    }
}

fn set_symmetric(data: &mut [Vec<f64>], i: usize, j: usize, value: f64) {
    for (row, col) in [(i, j), (j, i)] {
        if let Some(cell) = data.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = value;
        }
    }
}

fn summarise_column(column: &ColumnData) -> AttributeStats {
    match column {
        ColumnData::Numeric(_) => {
            let present = column.present_values().unwrap_or_default();
            let five = stats::five_number(&present);
            AttributeStats::Numeric(NumericSummary {
                min: five.min,
                q1: five.q1,
                median: five.median,
                mean: stats::mean(&present),
                q3: five.q3,
                max: five.max,
                missing: column.missing_count(),
            })
        }
        ColumnData::Categorical { .. } => AttributeStats::Categorical(CategoricalSummary {
            levels: column
                .level_counts()
                .unwrap_or_default()
                .into_iter()
                .map(|(label, count)| LevelCount { label, count })
                .collect(),
            missing: column.missing_count(),
        }),
    }
}
