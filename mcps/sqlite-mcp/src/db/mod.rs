//! Database access layer: values, results, and the statement executor

pub mod error;
pub mod executor;
pub mod result;
pub mod value;

pub use error::{ExecutionError, ExecutionResult};
pub use executor::{execute_blocking, Executor};
pub use result::QueryResult;
pub use value::{Row, SqlValue};
