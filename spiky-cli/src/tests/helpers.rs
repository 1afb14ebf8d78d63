//! Test helpers for building city databases on disk.

use camino::{Utf8Path, Utf8PathBuf};
use spiky_core::{CityRecord, test_support::write_sqlite_database};
use tempfile::TempDir;

pub(super) struct CityDatabase {
    _dir: TempDir,
    root: Utf8PathBuf,
    path: Utf8PathBuf,
}

impl CityDatabase {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        let path = root.join("frontend.db");
        let cities = [
            CityRecord::new("lim", "Lima", "Peru", -12.05, -77.04, 9).expect("valid city"),
            CityRecord::new("scl", "Santiago", "Chile", -33.45, -70.67, 4).expect("valid city"),
        ];
        write_sqlite_database(path.as_std_path(), &cities).expect("write city database");
        Self {
            _dir: dir,
            root,
            path,
        }
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub(super) fn missing(&self) -> Utf8PathBuf {
        self.root.join("absent.db")
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl std::fmt::Debug for CityDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CityDatabase")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
