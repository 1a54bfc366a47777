//! WHERE clause building.
//!
//! The builder turns a [`ConditionSet`](crate::ConditionSet) plus operator and
//! format choices into a parameterized SQL fragment:
//!
//! - Placeholders are `?`, bound in the order the conditions were given.
//! - Each operator renders through its own generator (see [`dispatch`]).
//! - Empty values mean "no filter" and are skipped.
//!
//! ```rust
//! use tablekit::builder::{Lead, WhereBuilder};
//! use tablekit::{ConditionSet, FormatSpec, OperatorSpec};
//! use serde_json::json;
//!
//! let conditions = ConditionSet::new().with("status", json!("draft"));
//! let (ops, formats) = (OperatorSpec::default(), FormatSpec::default());
//! let clause = WhereBuilder::new(&ops, &formats)
//!     .build_clause(Lead::Baseline, &conditions)
//!     .unwrap();
//! assert_eq!(clause.sql, "WHERE 1=1 AND `status` = ?");
//! ```

pub mod dispatch;
pub mod fragment;
pub mod where_builder;

pub use dispatch::{Dispatcher, FragmentFn, FragmentInput};
pub use fragment::SqlFragment;
pub use where_builder::{Lead, WhereBuilder, single_condition};
