//! SQLite-backed store implementation for persisted cities.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use log::debug;
use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags, Row};
use thiserror::Error;

use crate::{CityRecord, CityRecordError};

use super::{CityStore, StoreUnavailableError};

const LIST_CITIES_QUERY: &str =
    "SELECT id, city, country_name, lat, lng, mentions FROM cities ORDER BY rowid";

/// Error raised when opening or reading the SQLite city database.
#[derive(Debug, Error)]
pub enum SqliteCityStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Preparing, executing or closing a query failed.
    #[error("failed to {operation}: {source}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
}

/// Read-only city store backed by a single SQLite connection.
///
/// The connection is opened once and shared by every caller; reads are
/// serialised through a mutex.
pub struct SqliteCityStore {
    path: PathBuf,
    connection: Mutex<Connection>,
}

impl fmt::Debug for SqliteCityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCityStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteCityStore {
    /// Open the database at `path` read-only and check the `cities` query.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteCityStoreError::OpenDatabase`] when the file cannot be
    /// opened and [`SqliteCityStoreError::Query`] when the `cities` table is
    /// missing or lacks the expected columns.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SqliteCityStoreError> {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteCityStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;

        connection
            .prepare_cached(LIST_CITIES_QUERY)
            .map_err(|source| SqliteCityStoreError::Query {
                operation: "prepare city selection",
                source,
            })?;

        debug!("opened city database at {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            connection: Mutex::new(connection),
        })
    }

    /// Location of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the connection, surfacing any error SQLite reports on close.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteCityStoreError::Query`] when SQLite refuses to close.
    pub fn close(self) -> Result<(), SqliteCityStoreError> {
        let Self { path, connection } = self;
        connection
            .into_inner()
            .close()
            .map_err(|(_, source)| SqliteCityStoreError::Query {
                operation: "close database",
                source,
            })?;
        debug!("closed city database at {}", path.display());
        Ok(())
    }

    fn read_rows(&self) -> Result<Vec<CityRow>, SqliteCityStoreError> {
        let connection = self.connection.lock();
        let mut statement = connection.prepare_cached(LIST_CITIES_QUERY).map_err(|source| {
            SqliteCityStoreError::Query {
                operation: "prepare city selection",
                source,
            }
        })?;
        let rows = statement
            .query_map([], CityRow::from_row)
            .map_err(|source| SqliteCityStoreError::Query {
                operation: "query cities",
                source,
            })?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|source| SqliteCityStoreError::Query {
                operation: "read city row",
                source,
            })
    }
}

impl CityStore for SqliteCityStore {
    fn list_cities(&self) -> Result<Vec<CityRecord>, StoreUnavailableError> {
        let rows = self
            .read_rows()
            .map_err(|err| StoreUnavailableError::Backend(Box::new(err)))?;
        let records = rows
            .into_iter()
            .map(CityRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("read {} cities from {}", records.len(), self.path.display());
        Ok(records)
    }
}

/// Raw `cities` row before validation.
#[derive(Debug)]
struct CityRow {
    id: String,
    city: String,
    country_name: String,
    lat: f64,
    lng: f64,
    mentions: i64,
}

impl CityRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            city: row.get("city")?,
            country_name: row.get("country_name")?,
            lat: row.get("lat")?,
            lng: row.get("lng")?,
            mentions: row.get("mentions")?,
        })
    }
}

impl TryFrom<CityRow> for CityRecord {
    type Error = StoreUnavailableError;

    fn try_from(row: CityRow) -> Result<Self, Self::Error> {
        let CityRow {
            id,
            city,
            country_name,
            lat,
            lng,
            mentions,
        } = row;
        let invalid = |id: &str, source| StoreUnavailableError::InvalidRecord {
            id: id.to_owned(),
            source,
        };
        let mentions = u64::try_from(mentions)
            .map_err(|_| invalid(&id, CityRecordError::NegativeMentions { raw: mentions }))?;
        Self::new(id.clone(), city, country_name, lat, lng, mentions)
            .map_err(|source| invalid(&id, source))
    }
}
