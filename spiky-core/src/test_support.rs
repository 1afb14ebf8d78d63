//! Test-only `CityStore` implementations and SQLite fixtures.

use parking_lot::RwLock;

use crate::{CityRecord, CityStore, StoreUnavailableError};

/// Schema of the `cities` table read by `SqliteCityStore`.
pub const CITIES_SCHEMA: &str = "CREATE TABLE cities (
    id TEXT PRIMARY KEY NOT NULL,
    city TEXT NOT NULL,
    country_name TEXT NOT NULL,
    lat REAL NOT NULL,
    lng REAL NOT NULL,
    mentions INTEGER NOT NULL
)";

/// In-memory `CityStore` whose contents can be swapped between reads.
#[derive(Default, Debug)]
pub struct MemoryStore {
    cities: RwLock<Vec<CityRecord>>,
}

impl MemoryStore {
    /// Create a store holding `cities` in the given order.
    pub fn with_cities<I>(cities: I) -> Self
    where
        I: IntoIterator<Item = CityRecord>,
    {
        Self {
            cities: RwLock::new(cities.into_iter().collect()),
        }
    }

    /// Replace the stored cities.
    pub fn replace(&self, cities: Vec<CityRecord>) {
        *self.cities.write() = cities;
    }
}

impl CityStore for MemoryStore {
    fn list_cities(&self) -> Result<Vec<CityRecord>, StoreUnavailableError> {
        Ok(self.cities.read().clone())
    }
}

/// `CityStore` that always reports its backend as unavailable.
#[derive(Default, Debug, Clone, Copy)]
pub struct FailingStore;

impl CityStore for FailingStore {
    fn list_cities(&self) -> Result<Vec<CityRecord>, StoreUnavailableError> {
        Err(StoreUnavailableError::Backend(Box::new(
            std::io::Error::other("city store offline"),
        )))
    }
}

/// Write `cities` into a fresh SQLite database at `path`, in order.
///
/// # Errors
///
/// Returns any error raised by `rusqlite` while creating or filling the file.
#[cfg(feature = "store-sqlite")]
pub fn write_sqlite_database(
    path: &std::path::Path,
    cities: &[CityRecord],
) -> Result<(), rusqlite::Error> {
    let mut connection = rusqlite::Connection::open(path)?;
    connection.execute(CITIES_SCHEMA, [])?;
    let tx = connection.transaction()?;
    {
        let mut insert = tx.prepare(
            "INSERT INTO cities (id, city, country_name, lat, lng, mentions)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for city in cities {
            let mentions = i64::try_from(city.mentions)
                .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;
            insert.execute(rusqlite::params![
                city.id,
                city.city,
                city.country_name,
                city.lat,
                city.lng,
                mentions,
            ])?;
        }
    }
    tx.commit()
}
