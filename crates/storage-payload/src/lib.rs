//! # storage-payload
//!
//! A fluent builder for storage service query payloads.
//!
//! ## Features
//!
//! - **Fluent**: chain clause calls, render once at the end
//! - **Validated eagerly**: a bad condition, aggregate or sort is an error at the call that adds it
//! - **Deterministic**: keys render in insertion order, so equal call sequences give equal bytes
//! - **Wire compatible**: one aggregate/sort renders as an object, several as an array
//! - **Query parameters**: filter-only lookups render as `column=value&..`
//!
//! ## Usage
//!
//! ```ignore
//! use storage_payload::PayloadBuilder;
//!
//! // SELECT
//! let mut pb = PayloadBuilder::new();
//! pb.select(["id", "type"])
//!     .from("schedules")
//!     .where_(("id", "=", "test"))?
//!     .where_and([("process_name", "=", "sleep")])?
//!     .order_by([("id", "desc")])?
//!     .aggregate([("count", "id")])?
//!     .limit(3);
//! let json = pb.render().to_json();
//!
//! // INSERT (columns are merged flat next to `table`)
//! let mut pb = PayloadBuilder::new();
//! pb.insert_into("schedules")
//!     .insert([("id", "test"), ("process_name", "sleep")]);
//!
//! // UPDATE (columns nested under `values`)
//! let mut pb = PayloadBuilder::new();
//! pb.update_table("schedules")
//!     .update([("process_name", "sleep")])
//!     .where_(("id", "=", "test"))?;
//!
//! // Query parameters
//! let mut pb = PayloadBuilder::new();
//! pb.where_(("key", "=", "COAP_CONF"))?;
//! assert_eq!(pb.render_query_params()?, "key=COAP_CONF");
//! # Ok::<(), storage_payload::PayloadError>(())
//! ```

pub mod builder;
pub mod condition;
pub mod config;
pub mod entry;
pub mod error;
pub mod params;
pub mod payload;
pub mod prelude;
pub mod scalar;
pub mod transport;

pub use builder::PayloadBuilder;
pub use condition::{Condition, IntoCondition, Link, Operator, WhereClause, is_valid_condition};
pub use config::{EntryShape, PayloadConfig};
pub use entry::{
    Aggregate, AggregateOp, Direction, Entries, IntoAggregate, IntoSort, Sort,
    is_valid_aggregate, is_valid_sort,
};
pub use error::{PayloadError, PayloadResult};
pub use payload::Payload;
pub use scalar::Scalar;
pub use transport::StorageTransport;
