//! End-to-end runs over the fixture files in `testdata/`.
//!
//! `iris_sample.csv` holds five rows of each iris species; `pima_sample.csv`
//! holds the first ten rows of the Pima diabetes data with `NA` gaps.

use descry::dataset::{AttributeKind, ColumnSelection, Dataset};
use descry::error::{DescryError, Result};
use descry::frame::load_dataset;
use descry::stats::{CorrelationMethod, SkewnessKind};
use descry::summary::{AttributeStats, SummaryEngine, SummaryKind, SummaryResult, render_report};
use std::path::Path;
use std::process::Command;

fn iris() -> Result<Dataset> {
    load_dataset(Path::new("testdata/iris_sample.csv"))
}

fn pima() -> Result<Dataset> {
    load_dataset(Path::new("testdata/pima_sample.csv"))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-8
}

#[test]
fn test_iris_walkthrough() -> Result<()> {
    let ds = iris()?;
    let engine = SummaryEngine::new(&ds);

    let shape = engine.shape();
    assert_eq!((shape.rows, shape.columns), (15, 5));

    let types = engine.type_map();
    assert_eq!(types.get("Sepal.Length"), Some(AttributeKind::Numeric));
    assert_eq!(types.get("Species"), Some(AttributeKind::Categorical));

    let dist = engine.class_distribution("Species")?;
    assert_eq!(dist.classes.len(), 3);
    for class in &dist.classes {
        assert_eq!(class.count, 5);
        assert!((class.percentage - 100.0 / 3.0).abs() < 1e-9);
    }

    let sd = engine.std_dev_vector(&ColumnSelection::AllNumeric)?;
    assert_eq!(sd.values.len(), 4);
    assert!(close(sd.get("Petal.Length").unwrap_or_default(), 1.891_887_442_5));

    let corr = engine.correlation_matrix(&ColumnSelection::AllNumeric)?;
    assert!(close(corr.get("Petal.Length", "Petal.Width").unwrap_or_default(), 0.986_039_780_0));
    assert!(close(corr.get("Sepal.Width", "Sepal.Length").unwrap_or_default(), -0.160_904_205_9));
    Ok(())
}

#[test]
fn test_pima_summary_with_gaps() -> Result<()> {
    let ds = pima()?;
    let table = SummaryEngine::new(&ds).summary_table();
    assert_eq!(table.row_count, 10);

    let Some(AttributeStats::Numeric(insulin)) = table.get("insulin") else {
        panic!("insulin should be numeric");
    };
    assert_eq!(insulin.missing, 6);
    assert_eq!(insulin.min, Some(88.0));
    assert_eq!(insulin.q1, Some(92.5));
    assert_eq!(insulin.median, Some(131.0));
    assert_eq!(insulin.q3, Some(261.75));
    assert_eq!(insulin.max, Some(543.0));

    let Some(AttributeStats::Numeric(glucose)) = table.get("glucose") else {
        panic!("glucose should be numeric");
    };
    assert_eq!(glucose.missing, 0);
    assert!(close(glucose.mean.unwrap_or_default(), 127.3));
    assert_eq!(glucose.q3, Some(145.25));

    let Some(AttributeStats::Categorical(diabetes)) = table.get("diabetes") else {
        panic!("diabetes should be categorical");
    };
    assert_eq!(diabetes.levels.len(), 2);
    assert_eq!(diabetes.missing, 0);
    Ok(())
}

#[test]
fn test_pima_vectors_and_matrix() -> Result<()> {
    let ds = pima()?;
    let engine = SummaryEngine::new(&ds);

    let dist = engine.class_distribution("diabetes")?;
    assert_eq!(dist.get("pos").map(|c| c.count), Some(6));
    assert!((dist.get("neg").map(|c| c.percentage).unwrap_or_default() - 40.0).abs() < 1e-9);

    let sd = engine.std_dev_vector(&ColumnSelection::named(["glucose", "insulin"]))?;
    assert!(close(sd.get("glucose").unwrap_or_default(), 40.075_068_448));
    assert!(close(sd.get("insulin").unwrap_or_default(), 216.248_892_097));

    let skew = engine.skewness_vector(&ColumnSelection::named(["pedigree"]))?;
    assert_eq!(skew.kind, SkewnessKind::Type3);
    assert!(close(skew.get("pedigree").unwrap_or_default(), 1.944_424_251_2));

    let corr = engine
        .correlation_matrix_with(&ColumnSelection::AllNumeric, CorrelationMethod::Pearson)?;
    assert_eq!(corr.len(), 8);
    assert!(close(corr.get("glucose", "insulin").unwrap_or_default(), 0.947_932_581_0));
    assert!(close(corr.get("mass", "pressure").unwrap_or_default(), -0.689_366_263_4));
    Ok(())
}

#[test]
fn test_pima_errors() -> Result<()> {
    let ds = pima()?;
    let engine = SummaryEngine::new(&ds);
    assert!(matches!(
        engine.class_distribution("age"),
        Err(DescryError::TypeMismatch { .. })
    ));
    assert!(matches!(
        engine.std_dev_vector(&ColumnSelection::named(["diabetes"])),
        Err(DescryError::TypeMismatch { .. })
    ));
    assert!(matches!(
        engine.correlation_matrix(&ColumnSelection::named(["bmi"])),
        Err(DescryError::SchemaMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_report_text() -> Result<()> {
    let ds = pima()?;
    let engine = SummaryEngine::new(&ds);
    let entries = engine.report(Some("diabetes"));
    assert!(entries.iter().all(|e| e.outcome.is_ok()));
    assert!(matches!(
        entries.first().map(|e| &e.outcome),
        Some(Ok(SummaryResult::Peek(p))) if p.len() == 6
    ));

    let text = render_report(&entries, 4);
    for kind in [SummaryKind::Shape, SummaryKind::ClassDistribution, SummaryKind::CorrelationMatrix] {
        assert!(text.contains(&format!("## {}", kind.title())), "{text}");
    }
    assert!(text.contains("10 rows x 9 columns"));
    assert!(text.contains("0.9479"));
    Ok(())
}

#[test]
fn test_binary_shape_and_json() -> Result<()> {
    let bin = env!("CARGO_BIN_EXE_descry");

    let out = Command::new(bin)
        .args(["shape", "--file", "testdata/iris_sample.csv"])
        .output()?;
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "15 rows x 5 columns");

    let out = Command::new(bin)
        .args(["classes", "-f", "testdata/pima_sample.csv", "--column", "diabetes", "--json"])
        .output()?;
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout)?;
    assert_eq!(json["kind"], "class_distribution");
    assert_eq!(json["result"]["classes"][0]["label"], "neg");
    assert_eq!(json["result"]["classes"][0]["count"], 4);

    let out = Command::new(bin)
        .args(["classes", "-f", "testdata/pima_sample.csv", "--column", "age"])
        .output()?;
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Type mismatch"));

    let out = Command::new(bin)
        .args(["correlation", "-f", "testdata/iris_sample.csv", "--json"])
        .output()?;
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout)?;
    assert_eq!(json["kind"], "correlation_matrix");
    assert_eq!(json["result"]["data"][0][0], 1.0);
    Ok(())
}
