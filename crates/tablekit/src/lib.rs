//! # tablekit
//!
//! Single-table CRUD on top of a synchronous SQL driver, built around a dynamic
//! WHERE-clause builder.
//!
//! ## Features
//!
//! - **Dynamic filters**: ordered field → value conditions with per-field or
//!   per-position operators (`=`, `IN`, `BETWEEN`, `LIKE`, ...) and formats
//! - **Parameterized**: every value is bound to a `?` placeholder, in order
//! - **Empty means no filter**: `null`, `""`, `0`, `[]` conditions are skipped
//! - **Column checks**: selected and ordered columns are vetted against the
//!   table's real column list
//! - **Safe defaults**: empty inserts, updates and deletes issue no statement
//! - **Statement logging**: every statement is emitted as a `tracing` event
//!
//! ## Usage
//!
//! ```ignore
//! use tablekit::{ConditionSet, Filter, Format, FormatSpec, Operator, OperatorSpec, SelectOptions, Table};
//! use serde_json::json;
//!
//! let posts = Table::new(&driver, "posts")?;
//!
//! // SELECT id,title FROM posts WHERE 1=1 AND `status` = ? AND `id` IN (?, ?)
//! let rows = posts.select_where(
//!     ["id", "title"],
//!     Filter::new(
//!         ConditionSet::new()
//!             .with("status", json!("draft"))
//!             .with("id", json!([1, 2])),
//!     )
//!     .operators(OperatorSpec::by_field([("id", Operator::In)]))
//!     .formats(FormatSpec::by_field([("id", Format::Integer)])),
//!     SelectOptions::new(),
//! )?;
//!
//! // DELETE FROM posts WHERE id IN (?, ?)
//! posts.delete_by_field_list("id", &[json!(4), json!(5)], "%d")?;
//! ```

pub mod builder;
pub mod client;
pub mod columns;
pub mod condition;
pub mod config;
pub mod error;
pub mod ident;
pub mod monitor;
pub mod param;
pub mod row;
pub mod table;

pub use builder::{Lead, SqlFragment, WhereBuilder};
pub use client::{Driver, ExecOutcome};
pub use columns::{Columns, Limit, Order};
pub use condition::{
    Choice, ConditionSet, Format, FormatSpec, Joiner, Operator, OperatorSpec, is_empty_value,
};
pub use config::{LogLevel, SqlLogConfig, TableConfig};
pub use error::{TableError, TableResult};
pub use monitor::{SqlLogger, StatementKind};
pub use param::Param;
pub use row::{FromRow, QueryOutput, ResultShape, Row, RowExt};
pub use table::{ColumnCounts, Filter, SelectOptions, Table};
