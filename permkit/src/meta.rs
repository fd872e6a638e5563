//! Instrumentation of long-running computations

pub mod timing;
pub use timing::TimedCode;
