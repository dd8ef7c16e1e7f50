use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use catalog_model::{RecordFields, ScholarshipRecord};

use crate::error::{Result, StoreError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS scholarships (
    id                 TEXT PRIMARY KEY,
    continent          TEXT NOT NULL,
    origin_country     TEXT NOT NULL,
    institution_name   TEXT NOT NULL,
    top_university     TEXT,
    program_level      TEXT NOT NULL,
    scholarship_type   TEXT NOT NULL,
    requirements       TEXT NOT NULL,
    benefit            TEXT NOT NULL,
    application_window TEXT NOT NULL,
    link               TEXT NOT NULL,
    created_at         TEXT
)";

/// SQLite-backed record store.
///
/// Holds only the database path: every operation opens a fresh connection
/// and closes it on return, so whole-operation serialization comes from
/// SQLite's own locking and no transaction ever spans two calls.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Open (and if necessary create) the catalog database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&path)?;
        conn.execute(SCHEMA, [])?;
        log::debug!("catalog store ready at {}", path.display());
        Ok(Self { path })
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Insert records, ignoring any whose id already exists.
    ///
    /// Returns the number of rows actually inserted. Records without a
    /// `created_at` are stamped with the insertion time; an existing row is
    /// never overwritten (insert-or-ignore, not upsert).
    pub fn insert(&self, records: &[ScholarshipRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "INSERT OR IGNORE INTO scholarships (
                id, continent, origin_country, institution_name, top_university,
                program_level, scholarship_type, requirements, benefit,
                application_window, link, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        )?;

        let mut inserted = 0;
        for record in records {
            let created_at = record.created_at.unwrap_or_else(Utc::now);
            inserted += stmt.execute(params![
                record.id,
                record.continent,
                record.origin_country,
                record.institution_name,
                record.top_university,
                record.program_level,
                record.scholarship_type,
                record.requirements,
                record.benefit,
                record.application_window,
                record.link,
                created_at.to_rfc3339(),
            ])?;
        }
        log::info!("inserted {} of {} records", inserted, records.len());
        Ok(inserted)
    }

    /// Full scan in natural (insertion) order.
    pub fn fetch_all(&self) -> Result<Vec<ScholarshipRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, continent, origin_country, institution_name, top_university,
                    program_level, scholarship_type, requirements, benefit,
                    application_window, link, created_at
             FROM scholarships ORDER BY rowid",
        )?;
        let rows = stmt.query_and_then([], record_from_row)?;
        let records = rows.collect::<Result<Vec<_>>>()?;
        log::debug!("fetched {} records", records.len());
        Ok(records)
    }

    /// Delete by id; unknown ids are a silent no-op.
    pub fn delete(&self, id: &str) -> Result<()> {
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM scholarships WHERE id = ?1", params![id])?;
        if removed == 0 {
            log::debug!("delete: no record with id {id}");
        }
        Ok(())
    }

    /// Replace every non-id attribute of the record with `id`.
    ///
    /// The id itself is never touched; unknown ids are a silent no-op.
    pub fn update(&self, id: &str, fields: &RecordFields) -> Result<()> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE scholarships SET
                continent = ?1, origin_country = ?2, institution_name = ?3,
                top_university = ?4, program_level = ?5, scholarship_type = ?6,
                requirements = ?7, benefit = ?8, application_window = ?9,
                link = ?10, created_at = ?11
             WHERE id = ?12",
            params![
                fields.continent,
                fields.origin_country,
                fields.institution_name,
                fields.top_university,
                fields.program_level,
                fields.scholarship_type,
                fields.requirements,
                fields.benefit,
                fields.application_window,
                fields.link,
                fields.created_at.map(|ts| ts.to_rfc3339()),
                id,
            ],
        )?;
        if changed == 0 {
            log::debug!("update: no record with id {id}");
        }
        Ok(())
    }

    /// Delete every record.
    pub fn reset(&self) -> Result<()> {
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM scholarships", [])?;
        log::info!("reset: removed {removed} records");
        Ok(())
    }
}

fn record_from_row(row: &Row<'_>) -> Result<ScholarshipRecord> {
    let created_at: Option<String> = row.get(11)?;
    let created_at = created_at
        .map(|text| {
            DateTime::parse_from_rfc3339(&text)
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|_| StoreError::BadTimestamp(text))
        })
        .transpose()?;

    Ok(ScholarshipRecord {
        id: row.get(0)?,
        continent: row.get(1)?,
        origin_country: row.get(2)?,
        institution_name: row.get(3)?,
        top_university: row.get(4)?,
        program_level: row.get(5)?,
        scholarship_type: row.get(6)?,
        requirements: row.get(7)?,
        benefit: row.get(8)?,
        application_window: row.get(9)?,
        link: row.get(10)?,
        created_at,
    })
}
