//! Numeric building blocks for the summary engine.
//!
//! Everything here works on slices of already-present values; callers strip
//! missing values first. Location, spread and Pearson correlation are computed
//! by Polars over a `Float64Chunked` view of the slice. Conventions follow the
//! defaults of R's `stats` package where several exist:
//!
//! - quantiles use `QuantileMethod::Linear`, interpolating between order
//!   statistics at position `(n - 1) * p` (Hyndman & Fan type 7)
//! - standard deviation uses the `n - 1` denominator
//! - skewness is selectable, see [`SkewnessKind`]

use polars::prelude::{
    ChunkAgg as _, ChunkQuantile as _, ChunkVar as _, Float64Chunked, NewChunkedArray as _,
    PlSmallStr, QuantileMethod,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn chunked(values: &[f64]) -> Float64Chunked {
    Float64Chunked::from_slice(PlSmallStr::EMPTY, values)
}

/// True when every value equals the first. Empty input counts as constant.
fn is_constant(values: &[f64]) -> bool {
    values
        .split_first()
        .is_none_or(|(first, rest)| rest.iter().all(|v| v == first))
}

pub fn mean(values: &[f64]) -> Option<f64> {
    chunked(values).mean()
}

/// Sample standard deviation. `None` below two values, exactly `0.0` when
/// every value is equal.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    if is_constant(values) {
        return Some(0.0);
    }
    chunked(values).std(1)
}

pub fn quantile(values: &[f64], p: f64) -> Option<f64> {
    chunked(values)
        .quantile(p.clamp(0.0, 1.0), QuantileMethod::Linear)
        .unwrap_or(None)
}

/// Minimum, quartiles and maximum of one column.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct FiveNumber {
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

pub fn five_number(values: &[f64]) -> FiveNumber {
    let ca = chunked(values);
    let q = |p: f64| ca.quantile(p, QuantileMethod::Linear).unwrap_or(None);
    FiveNumber {
        min: ca.min(),
        q1: q(0.25),
        median: ca.median(),
        q3: q(0.75),
        max: ca.max(),
    }
}

/// Coefficient conventions for sample skewness.
///
/// With `m2`, `m3` the second and third central moments (divided by `n`) and
/// `g1 = m3 / m2^1.5`:
///
/// | kind | formula | minimum `n` |
/// |---|---|---|
/// | `Type1` | `g1` | 1 |
/// | `Type2` | `g1 * sqrt(n(n-1)) / (n-2)` | 3 |
/// | `Type3` | `g1 * ((n-1)/n)^1.5` | 1 |
#[derive(Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum SkewnessKind {
    Type1,
    Type2,
    #[default]
    Type3,
}

impl SkewnessKind {
    pub fn min_observations(self) -> usize {
        match self {
            Self::Type1 | Self::Type3 => 1,
            Self::Type2 => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Type1 => "type1",
            Self::Type2 => "type2",
            Self::Type3 => "type3",
        }
    }
}

impl fmt::Display for SkewnessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkewnessKind {
    type Err = crate::error::DescryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "type1" | "g1" => Ok(Self::Type1),
            "2" | "type2" | "adjusted" => Ok(Self::Type2),
            "3" | "type3" | "b1" => Ok(Self::Type3),
            other => Err(crate::error::DescryError::Config(format!(
                "unknown skewness kind '{other}' (expected type1, type2 or type3)"
            ))),
        }
    }
}

/// Sample skewness of `values`. Data with every value equal yields `0.0`.
///
/// Returns `None` when there are fewer values than `kind` needs.
pub fn skewness(values: &[f64], kind: SkewnessKind) -> Option<f64> {
    let n = values.len();
    if n < kind.min_observations() {
        return None;
    }
    if is_constant(values) {
        return Some(0.0);
    }
    let m = mean(values)?;
    let nf = n as f64;
    let (m2, m3) = values.iter().fold((0.0, 0.0), |(s2, s3), v| {
        let d = v - m;
        (s2 + d * d, s3 + d * d * d)
    });
    let (m2, m3) = (m2 / nf, m3 / nf);
    if m2 <= 0.0 {
        return Some(0.0);
    }

    let g1 = m3 / m2.powf(1.5);
    Some(match kind {
        SkewnessKind::Type1 => g1,
        SkewnessKind::Type2 => g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0),
        SkewnessKind::Type3 => g1 * ((nf - 1.0) / nf).powf(1.5),
    })
}

#[derive(Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    #[default]
    Pearson,
    Spearman,
}

impl CorrelationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pearson => "pearson",
            Self::Spearman => "spearman",
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CorrelationMethod {
    type Err = crate::error::DescryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pearson" => Ok(Self::Pearson),
            "spearman" => Ok(Self::Spearman),
            other => Err(crate::error::DescryError::Config(format!(
                "unknown correlation method '{other}' (expected pearson or spearman)"
            ))),
        }
    }
}

/// Rows where both columns are present.
pub fn pairwise_complete(x: &[Option<f64>], y: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip()
}

/// Pearson correlation. NaN when the lengths differ, there are fewer than two
/// pairs, or either side is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 || is_constant(x) || is_constant(y) {
        return f64::NAN;
    }
    polars::prelude::cov::pearson_corr(&chunked(x), &chunked(y))
        .map_or(f64::NAN, |r| r.clamp(-1.0, 1.0))
}

/// Ranks starting at 1, ties get the mean of the ranks they span.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    for group in order.chunk_by(|a, b| a.1 == b.1) {
        let end = start + group.len();
        // sorted positions start..end share the mean of ranks start+1..=end
        let rank = (start + end + 1) as f64 / 2.0;
        for &(idx, _) in group {
            if let Some(slot) = ranks.get_mut(idx) {
                *slot = rank;
            }
        }
        start = end;
    }
    ranks
}

pub fn correlation(x: &[f64], y: &[f64], method: CorrelationMethod) -> f64 {
    match method {
        CorrelationMethod::Pearson => pearson(x, y),
        CorrelationMethod::Spearman => pearson(&average_ranks(x), &average_ranks(y)),
    }
}
