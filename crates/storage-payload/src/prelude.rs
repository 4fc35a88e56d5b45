//! Convenient imports for typical `storage-payload` usage.
//!
//! ```ignore
//! use storage_payload::prelude::*;
//! ```

pub use crate::{
    AggregateOp, Condition, Direction, Operator, Payload, PayloadBuilder, PayloadConfig,
    PayloadError, PayloadResult, Scalar, StorageTransport,
};
