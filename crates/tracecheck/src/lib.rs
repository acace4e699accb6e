//! tracecheck - validate an emulator execution trace against nestest.
//!
//! Both traces are read up front, parsed line by line with their own
//! [`LineFormat`], and compared strictly by position. The first line whose
//! records disagree is reported with one diagnostic per differing field.
//!
//! # Example
//!
//! ```ignore
//! use tracecheck::{CompareConfig, compare_traces, load_trace};
//!
//! let nestest = load_trace("nestest.log".as_ref())?;
//! let output = load_trace("output.log".as_ref())?;
//! let result = compare_traces(&nestest, &output, &CompareConfig::default())?;
//! ```

pub use tracecheck_format::{
    EmulatorFormat, Field, FieldValue, Instruction, LineFormat, ParseError, ReferenceFormat,
};

mod compare;
mod error;
pub mod metrics;
pub mod report;
mod source;

pub use compare::{
    CompareConfig, LineMismatch, TraceComparison, compare_traces, compare_with_formats,
};
pub use error::{Error, Result};
pub use source::{TraceSide, load_trace};
