//! Seam to the storage service client.
//!
//! The builder never talks to the network. A client implements
//! [`StorageTransport`] and the builder hands it the rendered JSON or query
//! string via [`PayloadBuilder::query_with`](crate::PayloadBuilder::query_with)
//! and [`PayloadBuilder::query_params_with`](crate::PayloadBuilder::query_params_with).

use crate::error::PayloadError;

/// A client that can send a rendered payload to the storage service.
///
/// `Error` must absorb [`PayloadError`] so that a missing WHERE clause on a
/// query-parameter lookup surfaces through the same result.
pub trait StorageTransport {
    /// Whatever the service returns (rows, affected count, raw body...).
    type Output;
    type Error: From<PayloadError>;

    /// Send a JSON payload for `table`.
    fn query_with_payload(&self, table: &str, payload: &str) -> Result<Self::Output, Self::Error>;

    /// Look up rows in `table` by URL-encoded `column=value` parameters.
    fn query(&self, table: &str, params: &str) -> Result<Self::Output, Self::Error>;
}

impl<T: StorageTransport + ?Sized> StorageTransport for &T {
    type Output = T::Output;
    type Error = T::Error;

    fn query_with_payload(&self, table: &str, payload: &str) -> Result<Self::Output, Self::Error> {
        (**self).query_with_payload(table, payload)
    }

    fn query(&self, table: &str, params: &str) -> Result<Self::Output, Self::Error> {
        (**self).query(table, params)
    }
}
