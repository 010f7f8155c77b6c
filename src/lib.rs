//! # descry - descriptive summaries of tabular data
//!
//! descry answers the first questions asked of a new dataset: what does it
//! look like, how big is it, what type is each column, how are the classes
//! balanced, and how are the numeric columns spread, skewed and correlated.
//!
//! ## Quick Start
//!
//! ```no_run
//! use descry::dataset::ColumnSelection;
//! use descry::summary::{SummaryEngine, render};
//!
//! let ds = descry::frame::load_dataset("diabetes.csv".as_ref())?;
//! let engine = SummaryEngine::new(&ds);
//!
//! println!("{:?}", engine.shape());
//! let dist = engine.class_distribution("diabetes")?;
//! for class in &dist.classes {
//!     println!("{}: {} ({:.2}%)", class.label, class.count, class.percentage);
//! }
//!
//! let corr = engine.correlation_matrix(&ColumnSelection::AllNumeric)?;
//! # let _ = corr;
//! # Ok::<(), descry::error::DescryError>(())
//! ```
//!
//! ## Core Modules
//!
//! - [`dataset`]: immutable typed table with an explicit schema
//! - [`summary`]: the engine, its result types and text rendering
//! - [`stats`]: the numeric kernels (quantiles, moments, correlation)
//! - [`frame`]: loading files through Polars and converting frames
//! - [`config`]: engine settings stored as JSON
//! - [`error`]: error types and handling utilities
//! - [`logging`]: tracing setup for the binary
//!
//! Every summary reads the dataset and nothing else, so a dataset can be shared
//! by reference across threads and summarised concurrently.

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod frame;
pub mod logging;
pub mod stats;
pub mod summary;
pub mod utils;
