// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded project database backed by redb.

use std::path::Path;

use chrono::{DateTime, Utc};
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use serde::{Deserialize, Serialize};

use super::codec::{decode_list, encode_list};
use crate::models::{CreateProjectRequest, Project, UpdateProjectRequest};

/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "horizon.redb";

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: project id → serialized ProjectRow (JSON bytes).
const PROJECTS: TableDefinition<u64, &[u8]> = TableDefinition::new("projects");

/// Index: `!create_millis_be | !id_be` → project id, newest first.
const PROJECT_TIMELINE: TableDefinition<&[u8], u64> = TableDefinition::new("project_timeline");

/// Counters.
const META: TableDefinition<&str, u64> = TableDefinition::new("meta");

const NEXT_PROJECT_ID: &str = "next_project_id";

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProjectDbError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProjectDbResult<T> = Result<T, ProjectDbError>;

// =============================================================================
// Stored Row
// =============================================================================

/// On-disk shape of a project. Vesting schedules are kept as JSON array
/// text so a damaged schedule never makes the whole row unreadable.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProjectRow {
    id: u64,
    sale_start: DateTime<Utc>,
    sale_end: DateTime<Utc>,
    registration_time_ends: DateTime<Utc>,
    registration_time_starts: DateTime<Utc>,
    create_time: DateTime<Utc>,
    update_time: DateTime<Utc>,
    tge: DateTime<Utc>,
    unlock_time: DateTime<Utc>,
    #[serde(default)]
    vesting_portions_unlock_time: String,
    #[serde(default)]
    vesting_percent_per_portion: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id,
            sale_start: p.sale_start,
            sale_end: p.sale_end,
            registration_time_ends: p.registration_time_ends,
            registration_time_starts: p.registration_time_starts,
            create_time: p.create_time,
            update_time: p.update_time,
            tge: p.tge,
            unlock_time: p.unlock_time,
            vesting_portions_unlock_time: encode_list(&p.vesting_portions_unlock_time),
            vesting_percent_per_portion: encode_list(&p.vesting_percent_per_portion),
        }
    }
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            sale_start: row.sale_start,
            sale_end: row.sale_end,
            registration_time_ends: row.registration_time_ends,
            registration_time_starts: row.registration_time_starts,
            create_time: row.create_time,
            update_time: row.update_time,
            tge: row.tge,
            unlock_time: row.unlock_time,
            vesting_portions_unlock_time: decode_list(&row.vesting_portions_unlock_time),
            vesting_percent_per_portion: decode_list(&row.vesting_percent_per_portion),
        }
    }
}

fn encode_row(project: &Project) -> ProjectDbResult<Vec<u8>> {
    Ok(serde_json::to_vec(&ProjectRow::from(project))?)
}

fn decode_row(bytes: &[u8]) -> ProjectDbResult<Project> {
    let row: ProjectRow = serde_json::from_slice(bytes)?;
    Ok(row.into())
}

// =============================================================================
// Index Key Helpers
// =============================================================================

/// Build a composite key for the project_timeline table.
///
/// Both parts are inverted so newer projects sort first, and among projects
/// created in the same millisecond the higher id comes first.
fn make_timeline_key(create_time: DateTime<Utc>, id: u64) -> [u8; 16] {
    let millis = create_time.timestamp_millis();
    let mut key = [0u8; 16];
    key[..8].copy_from_slice(&(!millis as u64).to_be_bytes());
    key[8..].copy_from_slice(&(!id).to_be_bytes());
    key
}

// =============================================================================
// ProjectDatabase
// =============================================================================

/// Embedded ACID project store.
pub struct ProjectDatabase {
    db: Database,
}

impl ProjectDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> ProjectDbResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(PROJECTS)?;
            let _ = write_txn.open_table(PROJECT_TIMELINE)?;
            let _ = write_txn.open_table(META)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Cheap liveness probe used by the readiness check.
    pub fn ping(&self) -> ProjectDbResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(META)?;
        Ok(())
    }

    /// Insert a new project. Assigns the next id and both timestamps.
    pub fn create(&self, request: CreateProjectRequest) -> ProjectDbResult<Project> {
        let now = Utc::now();

        let write_txn = self.db.begin_write()?;
        let project = {
            let mut meta = write_txn.open_table(META)?;
            let id = meta.get(NEXT_PROJECT_ID)?.map(|v| v.value()).unwrap_or(1);
            meta.insert(NEXT_PROJECT_ID, id + 1)?;

            let project = Project {
                id,
                sale_start: request.sale_start,
                sale_end: request.sale_end,
                registration_time_ends: request.registration_time_ends,
                registration_time_starts: request.registration_time_starts,
                create_time: now,
                update_time: now,
                tge: request.tge,
                unlock_time: request.unlock_time,
                vesting_portions_unlock_time: request.vesting_portions_unlock_time,
                vesting_percent_per_portion: request.vesting_percent_per_portion,
            };

            let json = encode_row(&project)?;
            let mut projects = write_txn.open_table(PROJECTS)?;
            projects.insert(id, json.as_slice())?;

            let mut timeline = write_txn.open_table(PROJECT_TIMELINE)?;
            let key = make_timeline_key(project.create_time, id);
            timeline.insert(key.as_slice(), id)?;

            project
        };
        write_txn.commit()?;

        tracing::debug!(project_id = project.id, "Project created");
        Ok(project)
    }

    /// Look up a single project by id.
    pub fn find_by_id(&self, id: u64) -> ProjectDbResult<Option<Project>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PROJECTS)?;
        match table.get(id)? {
            Some(value) => Ok(Some(decode_row(value.value())?)),
            None => Ok(None),
        }
    }

    /// Apply a partial update. Returns `None` if the project does not exist.
    pub fn update(
        &self,
        id: u64,
        request: UpdateProjectRequest,
    ) -> ProjectDbResult<Option<Project>> {
        let write_txn = self.db.begin_write()?;
        let updated = {
            let mut table = write_txn.open_table(PROJECTS)?;

            // Copy out before mutating the table
            let existing = table.get(id)?.map(|v| v.value().to_vec());
            match existing {
                Some(bytes) => {
                    let mut project = decode_row(&bytes)?;
                    request.apply_to(&mut project);
                    project.update_time = Utc::now();

                    let json = encode_row(&project)?;
                    table.insert(id, json.as_slice())?;
                    Some(project)
                }
                None => None,
            }
        };
        write_txn.commit()?;
        Ok(updated)
    }

    /// Remove a project and its index entry. Returns whether it existed.
    pub fn delete(&self, id: u64) -> ProjectDbResult<bool> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(PROJECTS)?;
            let existing = table.remove(id)?.map(|v| v.value().to_vec());
            match existing {
                Some(bytes) => {
                    let project = decode_row(&bytes)?;
                    let mut timeline = write_txn.open_table(PROJECT_TIMELINE)?;
                    let key = make_timeline_key(project.create_time, id);
                    timeline.remove(key.as_slice())?;
                    true
                }
                None => false,
            }
        };
        write_txn.commit()?;
        Ok(removed)
    }

    /// Number of stored projects.
    pub fn count(&self) -> ProjectDbResult<u64> {
        let read_txn = self.db.begin_read()?;
        let timeline = read_txn.open_table(PROJECT_TIMELINE)?;
        Ok(timeline.len()?)
    }

    /// One page of projects, newest first, plus the total count.
    ///
    /// Both values come from the same read snapshot.
    pub fn find_with_pagination(
        &self,
        skip: u64,
        take: u32,
    ) -> ProjectDbResult<(Vec<Project>, u64)> {
        let read_txn = self.db.begin_read()?;
        let timeline = read_txn.open_table(PROJECT_TIMELINE)?;
        let projects = read_txn.open_table(PROJECTS)?;

        let total = timeline.len()?;
        if skip >= total || take == 0 {
            return Ok((Vec::new(), total));
        }

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let mut items = Vec::with_capacity(take as usize);
        for entry in timeline.iter()?.skip(skip).take(take as usize) {
            let (_, id) = entry?;
            let id = id.value();
            match projects.get(id)? {
                Some(value) => items.push(decode_row(value.value())?),
                None => tracing::warn!(project_id = id, "Timeline entry without project row"),
            }
        }

        Ok((items, total))
    }
}

// =============================================================================
// Tests
// =============================================================================
