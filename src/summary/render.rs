//! Plain-text rendering of summary results.
//!
//! Output is for people, not parsers; use `serde_json` on the result types
//! for machine-readable output. Numbers are right-aligned, text left-aligned,
//! undefined statistics print as `NA`.

use super::types::{
    AttributeStats, ClassDistribution, CorrelationMatrix, Preview, ReportEntry, Shape,
    SkewnessVector, StdDevVector, SummaryResult, SummaryTable, TypeMap,
};
use crate::dataset::Value;
use crate::utils::{fmt_num, fmt_opt};
use std::fmt::Write as _;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Minimal fixed-width table.
struct TextTable {
    header: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    fn new(header: Vec<String>, align: Vec<Align>) -> Self {
        Self {
            header,
            align,
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.header.len())
            .map(|i| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .chain(self.header.get(i))
                    .map(|c| c.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for line in std::iter::once(&self.header).chain(&self.rows) {
            let cells: Vec<String> = line
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let w = widths.get(i).copied().unwrap_or(0);
                    match self.align.get(i).copied().unwrap_or(Align::Left) {
                        Align::Left => format!("{cell:<w$}"),
                        Align::Right => format!("{cell:>w$}"),
                    }
                })
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

fn fmt_value(v: &Value, precision: usize) -> String {
    match v {
        Value::Numeric(x) => {
            // whole numbers print without a fractional part, like the source data
            if x.fract() == 0.0 && x.abs() < 1e15 {
                format!("{x:.0}")
            } else {
                fmt_num(*x, precision)
            }
        }
        other => other.to_string(),
    }
}

pub fn render_preview(preview: &Preview, precision: usize) -> String {
    let mut header = vec![String::new()];
    header.extend(preview.columns.iter().cloned());
    let align = std::iter::repeat_n(Align::Right, header.len()).collect();
    let mut table = TextTable::new(header, align);
    for (i, row) in preview.rows.iter().enumerate() {
        let mut cells = vec![(i + 1).to_string()];
        cells.extend(row.iter().map(|v| fmt_value(v, precision)));
        table.push(cells);
    }
    table.render()
}

pub fn render_shape(shape: &Shape) -> String {
    format!("{} rows x {} columns\n", shape.rows, shape.columns)
}

pub fn render_type_map(types: &TypeMap) -> String {
    let mut table = TextTable::new(
        vec!["attribute".to_owned(), "type".to_owned()],
        vec![Align::Left, Align::Left],
    );
    for entry in &types.attributes {
        table.push(vec![entry.name.clone(), entry.kind.to_string()]);
    }
    table.render()
}

pub fn render_class_distribution(dist: &ClassDistribution, precision: usize) -> String {
    let mut table = TextTable::new(
        vec![dist.attribute.clone(), "count".to_owned(), "percentage".to_owned()],
        vec![Align::Left, Align::Right, Align::Right],
    );
    for class in &dist.classes {
        table.push(vec![
            class.label.clone(),
            class.count.to_string(),
            fmt_num(class.percentage, precision),
        ]);
    }
    let mut out = table.render();
    if dist.missing > 0 {
        let _ = writeln!(out, "({} missing)", dist.missing);
    }
    out
}

pub fn render_summary_table(summary: &SummaryTable, precision: usize) -> String {
    let mut out = String::new();

    let mut numeric = TextTable::new(
        ["attribute", "Min", "1st Qu.", "Median", "Mean", "3rd Qu.", "Max", "NA's"]
            .map(str::to_owned)
            .to_vec(),
        std::iter::once(Align::Left)
            .chain(std::iter::repeat_n(Align::Right, 7))
            .collect(),
    );
    let mut has_numeric = false;

    for attr in &summary.attributes {
        match &attr.stats {
            AttributeStats::Numeric(s) => {
                has_numeric = true;
                numeric.push(vec![
                    attr.name.clone(),
                    fmt_opt(s.min, precision),
                    fmt_opt(s.q1, precision),
                    fmt_opt(s.median, precision),
                    fmt_opt(s.mean, precision),
                    fmt_opt(s.q3, precision),
                    fmt_opt(s.max, precision),
                    s.missing.to_string(),
                ]);
            }
            AttributeStats::Categorical(_) => {}
        }
    }
    if has_numeric {
        out.push_str(&numeric.render());
    }

    for attr in &summary.attributes {
        if let AttributeStats::Categorical(s) = &attr.stats {
            if !out.is_empty() {
                out.push('\n');
            }
            let mut table = TextTable::new(
                vec![attr.name.clone(), "count".to_owned()],
                vec![Align::Left, Align::Right],
            );
            for level in &s.levels {
                table.push(vec![level.label.clone(), level.count.to_string()]);
            }
            if s.missing > 0 {
                table.push(vec!["NA's".to_owned(), s.missing.to_string()]);
            }
            out.push_str(&table.render());
        }
    }

    if out.is_empty() {
        out.push_str("(no attributes)\n");
    }
    out
}

fn render_named(values: &[super::types::NamedValue], label: &str, precision: usize) -> String {
    let mut table = TextTable::new(
        vec!["attribute".to_owned(), label.to_owned()],
        vec![Align::Left, Align::Right],
    );
    for v in values {
        table.push(vec![v.attribute.clone(), fmt_num(v.value, precision)]);
    }
    table.render()
}

pub fn render_std_dev(sd: &StdDevVector, precision: usize) -> String {
    render_named(&sd.values, "sd", precision)
}

pub fn render_skewness(skew: &SkewnessVector, precision: usize) -> String {
    render_named(&skew.values, &format!("skewness ({})", skew.kind), precision)
}

pub fn render_correlation(matrix: &CorrelationMatrix, precision: usize) -> String {
    let mut header = vec![String::new()];
    header.extend(matrix.columns.iter().cloned());
    let align = std::iter::once(Align::Left)
        .chain(std::iter::repeat_n(Align::Right, matrix.columns.len()))
        .collect();
    let mut table = TextTable::new(header, align);
    for (name, row) in matrix.columns.iter().zip(&matrix.data) {
        let mut cells = vec![name.clone()];
        cells.extend(row.iter().map(|v| fmt_num(*v, precision)));
        table.push(cells);
    }
    table.render()
}

/// Renders any result.
pub fn render(result: &SummaryResult, precision: usize) -> String {
    match result {
        SummaryResult::Peek(p) => render_preview(p, precision),
        SummaryResult::Shape(s) => render_shape(s),
        SummaryResult::TypeMap(t) => render_type_map(t),
        SummaryResult::ClassDistribution(d) => render_class_distribution(d, precision),
        SummaryResult::SummaryTable(s) => render_summary_table(s, precision),
        SummaryResult::StdDevVector(s) => render_std_dev(s, precision),
        SummaryResult::SkewnessVector(s) => render_skewness(s, precision),
        SummaryResult::CorrelationMatrix(m) => render_correlation(m, precision),
    }
}

/// Renders a full report as titled sections; failed views show their error.
pub fn render_report(entries: &[ReportEntry], precision: usize) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "## {}", entry.kind.title());
        match &entry.outcome {
            Ok(result) => out.push_str(&render(result, precision)),
            Err(e) => {
                let _ = writeln!(out, "skipped: {e}");
            }
        }
    }
    out
}
