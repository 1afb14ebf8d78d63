//! Data access traits for city records.
//!
//! The `CityStore` trait defines a read-only interface returning the full set
//! of [`CityRecord`] values. There is no filtering or pagination: consumers
//! always receive every city the source knows about.

use thiserror::Error;

use crate::{CityRecord, CityRecordError};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteCityStore, SqliteCityStoreError};

/// The backing store could not produce a complete, valid city set.
#[derive(Debug, Error)]
pub enum StoreUnavailableError {
    /// The storage backend failed to open or answer the query.
    #[error("city store backend failed")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    /// A stored row could not be turned into a valid [`CityRecord`].
    #[error("city {id:?} in the store is malformed")]
    InvalidRecord {
        /// Identifier of the offending row, as stored.
        id: String,
        /// Validation failure.
        #[source]
        source: CityRecordError,
    },
}

/// Read-only access to persisted city records.
///
/// Implementations must be shareable across request handlers, hence the
/// `Send + Sync` bound.
///
/// # Examples
///
/// ```rust
/// use spiky_core::{CityRecord, CityStore, StoreUnavailableError};
///
/// struct OneCity(CityRecord);
///
/// impl CityStore for OneCity {
///     fn list_cities(&self) -> Result<Vec<CityRecord>, StoreUnavailableError> {
///         Ok(vec![self.0.clone()])
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = OneCity(CityRecord::new("osl", "Oslo", "Norway", 59.9, 10.7, 2)?);
/// assert_eq!(store.list_cities()?.len(), 1);
/// # Ok(())
/// # }
/// ```
pub trait CityStore: Send + Sync {
    /// Return every city record, in the store's natural order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreUnavailableError`] when the source cannot be read or
    /// holds a malformed row. Partial results are never returned.
    fn list_cities(&self) -> Result<Vec<CityRecord>, StoreUnavailableError>;
}

impl<S: CityStore + ?Sized> CityStore for std::sync::Arc<S> {
    fn list_cities(&self) -> Result<Vec<CityRecord>, StoreUnavailableError> {
        (**self).list_cities()
    }
}
