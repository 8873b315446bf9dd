use crate::domain::{BookedServices, Itinerary};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The one snapshot slot. Saving replaces whatever was there; the
/// workflow never reads it back.
pub const SNAPSHOT_KEY: &str = "final_itinerary";

pub fn snapshot_db_path(state_root: &Path) -> PathBuf {
    state_root.join("snapshots.db")
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to create snapshot database parent {path}: {source}")]
    CreateParent {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("sqlite open failed at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("sqlite statement failed: {source}")]
    Sql {
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to encode snapshot payload: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TripSnapshot {
    pub itinerary: Itinerary,
    pub booked_services: BookedServices,
    pub total_service_cost: f64,
    pub saved_at: i64,
}

pub struct SnapshotStore {
    db_path: PathBuf,
}

impl SnapshotStore {
    pub fn open(db_path: &Path) -> Result<Self, SnapshotError> {
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent).map_err(|source| SnapshotError::CreateParent {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let store = Self {
            db_path: db_path.to_path_buf(),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    fn connect(&self) -> Result<Connection, SnapshotError> {
        Connection::open(&self.db_path).map_err(|source| SnapshotError::Open {
            path: self.db_path.display().to_string(),
            source,
        })
    }

    fn ensure_schema(&self) -> Result<(), SnapshotError> {
        let connection = self.connect()?;
        connection
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS snapshots (
                    key TEXT NOT NULL PRIMARY KEY,
                    payload TEXT NOT NULL,
                    saved_at INTEGER NOT NULL
                );
                ",
            )
            .map_err(|source| SnapshotError::Sql { source })
    }

    pub fn save(&self, snapshot: &TripSnapshot) -> Result<(), SnapshotError> {
        let payload = serde_json::to_string(snapshot).map_err(SnapshotError::Encode)?;
        let connection = self.connect()?;
        connection
            .execute(
                "INSERT INTO snapshots (key, payload, saved_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET payload = ?2, saved_at = ?3",
                params![SNAPSHOT_KEY, payload, snapshot.saved_at],
            )
            .map_err(|source| SnapshotError::Sql { source })?;
        Ok(())
    }

    pub fn snapshot_count(&self) -> Result<u64, SnapshotError> {
        let connection = self.connect()?;
        connection
            .query_row("SELECT COUNT(*) FROM snapshots", [], |row| row.get(0))
            .map_err(|source| SnapshotError::Sql { source })
    }
}
