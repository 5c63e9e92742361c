//! SQLite store for locations and hourly weather readings.
//!
//! `(location_id, time)` is unique, so re-fetching a range never produces a
//! second row for the same hour. Times are written as UTC
//! `YYYY-MM-DD HH:MM:SS` text, which keeps range filters lexically ordered.

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use wxlog_weather::{FetchedReading, Reading};

use crate::error::{StoreError, StoreResult};
use crate::types::Location;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// GLOB matching text already in [`TIME_FORMAT`].
const CANONICAL_TIME_GLOB: &str =
    "[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9] [0-9][0-9]:[0-9][0-9]:[0-9][0-9]";

/// Formats accepted when reading back timestamps written by other tools.
const NAIVE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const SCHEMA: &str = r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS locations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE NOT NULL,
        lat REAL NOT NULL,
        lon REAL NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );

    CREATE TABLE IF NOT EXISTS weather_readings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        location_id INTEGER NOT NULL,
        time TIMESTAMP NOT NULL,
        temp_c REAL,
        source TEXT,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        UNIQUE(location_id, time),
        FOREIGN KEY(location_id) REFERENCES locations(id)
    );

    CREATE INDEX IF NOT EXISTS idx_readings_location_time
        ON weather_readings(location_id, time);
"#;

/// Owns the single connection every pipeline call goes through.
pub struct WeatherStore {
    conn: Connection,
}

impl WeatherStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        tracing::debug!("Opened weather database at {}", path.display());
        Ok(store)
    }

    /// Fresh in-memory database, one per call.
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Create tables and indexes if missing, then bring every stored time
    /// into canonical form.
    pub fn init(&self) -> StoreResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.canonicalize_times()?;
        tracing::info!("Database initialized with tables: locations, weather_readings");
        Ok(())
    }

    /// Rewrite times stored in other shapes (offsets, `T` separators, unix
    /// seconds) as UTC `YYYY-MM-DD HH:MM:SS`, so uniqueness and range
    /// filters see one value per hour.
    ///
    /// When a rewritten time collides with a row already holding that hour,
    /// the canonical row is kept; among several legacy rows the oldest wins.
    /// Rows whose time cannot be decoded are left as they are.
    fn canonicalize_times(&self) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        let stale: Vec<(i64, DateTime<Utc>)> = {
            let mut stmt = tx.prepare(
                "SELECT id, time FROM weather_readings
                 WHERE typeof(time) <> 'text' OR time NOT GLOB ?1
                 ORDER BY id ASC",
            )?;
            let mut rows = stmt.query(params![CANONICAL_TIME_GLOB])?;
            let mut stale = Vec::new();
            while let Some(row) = rows.next()? {
                let id: i64 = row.get(0)?;
                match decode_time(row.get_ref(1)?) {
                    Ok(time) => stale.push((id, time)),
                    Err(e) => tracing::warn!("Leaving reading {} as stored: {}", id, e),
                }
            }
            stale
        };

        if stale.is_empty() {
            return Ok(());
        }

        let mut rewritten = 0;
        let mut dropped = 0;
        {
            let mut update =
                tx.prepare("UPDATE OR IGNORE weather_readings SET time = ?1 WHERE id = ?2")?;
            let mut delete = tx.prepare("DELETE FROM weather_readings WHERE id = ?1")?;

            for (id, time) in &stale {
                let canonical = time.format(TIME_FORMAT).to_string();
                if update.execute(params![canonical, id])? == 1 {
                    rewritten += 1;
                } else {
                    delete.execute(params![id])?;
                    dropped += 1;
                }
            }
        }
        tx.commit()?;

        tracing::info!(
            "Canonicalized {} stored times, dropped {} duplicate hours",
            rewritten,
            dropped
        );
        Ok(())
    }

    /// Return the id for `name`, inserting the location first if needed.
    ///
    /// Coordinates are only written on first insert; later calls with
    /// different `lat`/`lon` leave the stored row untouched.
    pub fn insert_or_get_location(&self, name: &str, lat: f64, lon: f64) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT OR IGNORE INTO locations(name, lat, lon) VALUES (?1, ?2, ?3)",
            params![name, lat, lon],
        )?;

        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM locations WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        match id {
            Some(id) => {
                tracing::debug!("Location {} mapped to ID {}", name, id);
                Ok(id)
            }
            None => Err(StoreError::LocationInvariant(format!(
                "failed to insert or retrieve location {:?}",
                name
            ))),
        }
    }

    pub fn get_location_by_name(&self, name: &str) -> StoreResult<Option<Location>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, lat, lon, created_at FROM locations WHERE name = ?1",
        )?;
        let mut rows = stmt.query(params![name])?;

        match rows.next()? {
            Some(row) => Ok(Some(Self::row_to_location(row)?)),
            None => Ok(None),
        }
    }

    pub fn list_locations(&self) -> StoreResult<Vec<Location>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, lat, lon, created_at FROM locations ORDER BY name ASC")?;
        let mut rows = stmt.query([])?;

        let mut locations = Vec::new();
        while let Some(row) = rows.next()? {
            locations.push(Self::row_to_location(row)?);
        }
        Ok(locations)
    }

    /// Insert readings, skipping any whose `(location_id, time)` already exists.
    ///
    /// Duplicates inside `readings` are skipped against each other too.
    /// Returns how many rows were actually added.
    pub fn upsert_readings(&self, location_id: i64, readings: &[FetchedReading]) -> StoreResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR IGNORE INTO weather_readings(location_id, time, temp_c, source)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;

            for r in readings {
                let time = r.time.format(TIME_FORMAT).to_string();
                let changed = stmt.execute(params![location_id, time, r.temp_c, r.source])?;
                if changed == 0 {
                    tracing::debug!("Skipping duplicate reading at {}", time);
                } else {
                    inserted += changed;
                }
            }
        }
        tx.commit()?;

        tracing::info!("Inserted {} new readings", inserted);
        Ok(inserted)
    }

    /// Readings with `start <= time <= end`, oldest first.
    pub fn fetch_readings(
        &self,
        location_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Reading>> {
        let mut stmt = self.conn.prepare(
            "SELECT time, temp_c
             FROM weather_readings
             WHERE location_id = ?1 AND time BETWEEN ?2 AND ?3
             ORDER BY time ASC",
        )?;
        let mut rows = stmt.query(params![
            location_id,
            start.format(TIME_FORMAT).to_string(),
            end.format(TIME_FORMAT).to_string(),
        ])?;

        let mut readings = Vec::new();
        while let Some(row) = rows.next()? {
            let time = decode_time(row.get_ref(0)?)?;
            let temp_c = decode_temperature(row.get_ref(1)?)?;
            readings.push(Reading::new(time, temp_c));
        }
        Ok(readings)
    }

    pub fn count_readings(&self, location_id: i64) -> StoreResult<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM weather_readings WHERE location_id = ?1",
            params![location_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> StoreResult<()> {
        self.conn.close().map_err(|(_, e)| StoreError::Sqlite(e))?;
        tracing::debug!("Weather database closed");
        Ok(())
    }

    fn row_to_location(row: &rusqlite::Row) -> StoreResult<Location> {
        let created_at = match row.get_ref(4)? {
            ValueRef::Null => None,
            value => decode_time(value).ok(),
        };

        Ok(Location {
            id: row.get(0)?,
            name: row.get(1)?,
            latitude: row.get(2)?,
            longitude: row.get(3)?,
            created_at,
        })
    }

    #[cfg(test)]
    fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Turn a stored timestamp back into UTC, whatever shape it was written in.
fn decode_time(value: ValueRef<'_>) -> StoreResult<DateTime<Utc>> {
    match value {
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| StoreError::Decode(format!("time is not UTF-8: {}", e)))?;
            parse_time_text(text)
                .ok_or_else(|| StoreError::Decode(format!("unrecognized timestamp {:?}", text)))
        }
        ValueRef::Integer(secs) => DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| StoreError::Decode(format!("timestamp {} out of range", secs))),
        ValueRef::Real(secs) => DateTime::<Utc>::from_timestamp(secs.trunc() as i64, 0)
            .ok_or_else(|| StoreError::Decode(format!("timestamp {} out of range", secs))),
        other => Err(StoreError::Decode(format!(
            "unexpected {:?} value in time column",
            other.data_type()
        ))),
    }
}

fn parse_time_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Turn a stored temperature into `Option<f64>`.
///
/// Some writers store floats as raw little-endian blobs; those are decoded
/// here so callers never see bytes.
fn decode_temperature(value: ValueRef<'_>) -> StoreResult<Option<f64>> {
    match value {
        ValueRef::Null => Ok(None),
        ValueRef::Real(v) => Ok(Some(v)),
        ValueRef::Integer(v) => Ok(Some(v as f64)),
        ValueRef::Blob(bytes) => match bytes.len() {
            4 => {
                let mut buf = [0u8; 4];
                buf.copy_from_slice(bytes);
                Ok(Some(f32::from_le_bytes(buf) as f64))
            }
            8 => {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(bytes);
                Ok(Some(f64::from_le_bytes(buf)))
            }
            n => Err(StoreError::Decode(format!("{}-byte temperature blob", n))),
        },
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .map(Some)
            .ok_or_else(|| StoreError::Decode("non-numeric temperature text".to_string())),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use chrono::TimeZone;

    fn create_test_store() -> WeatherStore {
        WeatherStore::in_memory().expect("Failed to create in-memory store")
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn fetched(time: DateTime<Utc>, temp_c: Option<f64>) -> FetchedReading {
        FetchedReading {
            time,
            temp_c,
            latitude: 40.0,
            longitude: -86.0,
            source: "open-meteo".to_string(),
        }
    }

    #[test]
    fn test_init_is_idempotent() {
        let store = create_test_store();
        let id = store.insert_or_get_location("Indy", 39.77, -86.16).unwrap();
        store.upsert_readings(id, &[fetched(at(2024, 1, 1, 0, 0), Some(1.0))]).unwrap();

        store.init().unwrap();
        store.init().unwrap();

        assert_eq!(store.count_readings(id).unwrap(), 1);
        assert!(store.get_location_by_name("Indy").unwrap().is_some());
    }

    #[test]
    fn test_location_identity_is_stable() {
        let store = create_test_store();

        let first = store.insert_or_get_location("Indy", 39.77, -86.16).unwrap();
        let second = store.insert_or_get_location("Indy", 0.0, 0.0).unwrap();
        assert_eq!(first, second);

        let loc = store.get_location_by_name("Indy").unwrap().unwrap();
        assert_eq!(loc.latitude, 39.77);
        assert_eq!(loc.longitude, -86.16);
        assert!(loc.created_at.is_some());
    }

    #[test]
    fn test_location_names_are_case_sensitive() {
        let store = create_test_store();

        let a = store.insert_or_get_location("paris", 48.85, 2.35).unwrap();
        let b = store.insert_or_get_location("Paris", 48.85, 2.35).unwrap();
        assert_ne!(a, b);
        assert!(store.get_location_by_name("PARIS").unwrap().is_none());
    }

    #[test]
    fn test_list_locations_sorted_by_name() {
        let store = create_test_store();
        store.insert_or_get_location("Zurich", 47.37, 8.54).unwrap();
        store.insert_or_get_location("Amsterdam", 52.37, 4.89).unwrap();

        let names: Vec<_> = store
            .list_locations()
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Amsterdam", "Zurich"]);
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let store = create_test_store();
        let id = store.insert_or_get_location("Indy", 39.77, -86.16).unwrap();
        let readings = vec![
            fetched(at(2024, 1, 1, 0, 0), Some(1.0)),
            fetched(at(2024, 1, 1, 1, 0), Some(2.5)),
            fetched(at(2024, 1, 2, 0, 0), Some(-0.5)),
        ];

        assert_eq!(store.upsert_readings(id, &readings).unwrap(), 3);
        assert_eq!(store.upsert_readings(id, &readings).unwrap(), 0);
        assert_eq!(store.count_readings(id).unwrap(), 3);
    }

    #[test]
    fn test_duplicates_within_batch_dedup() {
        let store = create_test_store();
        let id = store.insert_or_get_location("Indy", 39.77, -86.16).unwrap();
        let readings = vec![
            fetched(at(2024, 1, 1, 0, 0), Some(1.0)),
            fetched(at(2024, 1, 1, 0, 0), Some(9.9)),
            fetched(at(2024, 1, 1, 1, 0), None),
        ];

        assert_eq!(store.upsert_readings(id, &readings).unwrap(), 2);

        let stored = store
            .fetch_readings(id, at(2024, 1, 1, 0, 0), at(2024, 1, 1, 23, 59))
            .unwrap();
        assert_eq!(stored[0].temp_c, Some(1.0));
        assert_eq!(stored[1].temp_c, None);
    }

    #[test]
    fn test_same_time_from_other_source_is_dropped() {
        let store = create_test_store();
        let id = store.insert_or_get_location("Indy", 39.77, -86.16).unwrap();

        let mut other = fetched(at(2024, 1, 1, 0, 0), Some(5.0));
        other.source = "station".to_string();

        store.upsert_readings(id, &[fetched(at(2024, 1, 1, 0, 0), Some(1.0))]).unwrap();
        assert_eq!(store.upsert_readings(id, &[other]).unwrap(), 0);
    }

    #[test]
    fn test_same_time_different_locations_both_stored() {
        let store = create_test_store();
        let a = store.insert_or_get_location("A", 1.0, 1.0).unwrap();
        let b = store.insert_or_get_location("B", 2.0, 2.0).unwrap();
        let r = [fetched(at(2024, 1, 1, 0, 0), Some(1.0))];

        assert_eq!(store.upsert_readings(a, &r).unwrap(), 1);
        assert_eq!(store.upsert_readings(b, &r).unwrap(), 1);
    }

    #[test]
    fn test_unknown_location_is_rejected() {
        let store = create_test_store();
        let result = store.upsert_readings(999, &[fetched(at(2024, 1, 1, 0, 0), Some(1.0))]);
        assert!(matches!(result, Err(StoreError::Sqlite(_))));
    }

    #[test]
    fn test_range_is_inclusive_and_ordered() {
        let store = create_test_store();
        let id = store.insert_or_get_location("Indy", 39.77, -86.16).unwrap();
        store
            .upsert_readings(
                id,
                &[
                    fetched(at(2024, 1, 2, 0, 0), Some(-0.5)),
                    fetched(at(2024, 1, 1, 1, 0), Some(2.5)),
                    fetched(at(2024, 1, 1, 0, 0), Some(1.0)),
                ],
            )
            .unwrap();

        let mid = store
            .fetch_readings(id, at(2024, 1, 1, 0, 30), at(2024, 1, 1, 23, 59))
            .unwrap();
        assert_eq!(mid, vec![Reading::new(at(2024, 1, 1, 1, 0), Some(2.5))]);

        let all = store
            .fetch_readings(id, at(2024, 1, 1, 0, 0), at(2024, 1, 2, 0, 0))
            .unwrap();
        let times: Vec<_> = all.iter().map(|r| r.time).collect();
        assert_eq!(
            times,
            vec![at(2024, 1, 1, 0, 0), at(2024, 1, 1, 1, 0), at(2024, 1, 2, 0, 0)]
        );
    }

    #[test]
    fn test_fetch_only_returns_requested_location() {
        let store = create_test_store();
        let a = store.insert_or_get_location("A", 1.0, 1.0).unwrap();
        let b = store.insert_or_get_location("B", 2.0, 2.0).unwrap();
        store.upsert_readings(a, &[fetched(at(2024, 1, 1, 0, 0), Some(1.0))]).unwrap();
        store.upsert_readings(b, &[fetched(at(2024, 1, 1, 0, 0), Some(7.0))]).unwrap();

        let readings = store
            .fetch_readings(b, at(2024, 1, 1, 0, 0), at(2024, 1, 1, 0, 0))
            .unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].temp_c, Some(7.0));
    }

    #[test]
    fn test_decodes_foreign_encodings() {
        let store = create_test_store();
        let id = store.insert_or_get_location("Legacy", 1.0, 1.0).unwrap();

        store
            .conn()
            .execute(
                "INSERT INTO weather_readings(location_id, time, temp_c) VALUES (?1, ?2, ?3)",
                params![id, "2024-01-01 02:00:00+00:00", 2.5f32.to_le_bytes().to_vec()],
            )
            .unwrap();
        store
            .conn()
            .execute(
                "INSERT INTO weather_readings(location_id, time, temp_c) VALUES (?1, ?2, ?3)",
                params![id, "2024-01-01 03:00:00", 4i64],
            )
            .unwrap();

        store.init().unwrap();

        let readings = store
            .fetch_readings(id, at(2024, 1, 1, 0, 0), at(2024, 1, 1, 23, 0))
            .unwrap();
        assert_eq!(
            readings,
            vec![
                Reading::new(at(2024, 1, 1, 2, 0), Some(2.5)),
                Reading::new(at(2024, 1, 1, 3, 0), Some(4.0)),
            ]
        );
    }

    fn seed_raw(store: &WeatherStore, id: i64, time: impl rusqlite::ToSql, temp_c: f64) {
        store
            .conn()
            .execute(
                "INSERT INTO weather_readings(location_id, time, temp_c) VALUES (?1, ?2, ?3)",
                params![id, time, temp_c],
            )
            .unwrap();
    }

    fn stored_times(store: &WeatherStore, id: i64) -> Vec<String> {
        let mut stmt = store
            .conn()
            .prepare("SELECT time FROM weather_readings WHERE location_id = ?1 ORDER BY time")
            .unwrap();
        let mut times = Vec::new();
        for time in stmt.query_map(params![id], |row| row.get(0)).unwrap() {
            times.push(time.unwrap());
        }
        times
    }

    #[test]
    fn test_upsert_over_offset_encoded_row_is_deduplicated() {
        let store = create_test_store();
        let id = store.insert_or_get_location("Legacy", 1.0, 1.0).unwrap();
        seed_raw(&store, id, "2024-01-01 02:00:00+00:00", 9.0);
        store.init().unwrap();

        let inserted = store
            .upsert_readings(id, &[fetched(at(2024, 1, 1, 2, 0), Some(2.5))])
            .unwrap();
        assert_eq!(inserted, 0);

        let day = store
            .fetch_readings(id, at(2024, 1, 1, 0, 0), at(2024, 1, 1, 23, 0))
            .unwrap();
        assert_eq!(day, vec![Reading::new(at(2024, 1, 1, 2, 0), Some(9.0))]);

        let exact = store
            .fetch_readings(id, at(2024, 1, 1, 2, 0), at(2024, 1, 1, 2, 0))
            .unwrap();
        assert_eq!(exact, day);
    }

    #[test]
    fn test_legacy_time_shapes_fall_inside_day_range() {
        let store = create_test_store();
        let id = store.insert_or_get_location("Legacy", 1.0, 1.0).unwrap();
        seed_raw(&store, id, "2024-01-01T05:00:00", 5.0);
        // Same hour as the row above; the older row is kept.
        seed_raw(&store, id, "2024-01-01 07:00:00+02:00", 3.0);
        // 2024-01-01T06:00:00Z as unix seconds
        seed_raw(&store, id, 1_704_088_800i64, 6.0);
        store.init().unwrap();

        let readings = store
            .fetch_readings(
                id,
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap(),
            )
            .unwrap();
        assert_eq!(
            readings,
            vec![
                Reading::new(at(2024, 1, 1, 5, 0), Some(5.0)),
                Reading::new(at(2024, 1, 1, 6, 0), Some(6.0)),
            ]
        );
        assert_eq!(
            stored_times(&store, id),
            vec!["2024-01-01 05:00:00", "2024-01-01 06:00:00"]
        );
    }

    #[test]
    fn test_canonical_row_survives_collision() {
        let store = create_test_store();
        let id = store.insert_or_get_location("Legacy", 1.0, 1.0).unwrap();
        store
            .upsert_readings(id, &[fetched(at(2024, 1, 1, 2, 0), Some(1.0))])
            .unwrap();
        seed_raw(&store, id, "2024-01-01T02:00:00Z", 8.0);
        assert_eq!(store.count_readings(id).unwrap(), 2);

        store.init().unwrap();

        assert_eq!(store.count_readings(id).unwrap(), 1);
        let readings = store
            .fetch_readings(id, at(2024, 1, 1, 2, 0), at(2024, 1, 1, 2, 0))
            .unwrap();
        assert_eq!(readings[0].temp_c, Some(1.0));
    }

    #[test]
    fn test_undecodable_time_is_left_alone() {
        let store = create_test_store();
        let id = store.insert_or_get_location("Legacy", 1.0, 1.0).unwrap();
        seed_raw(&store, id, "sometime", 1.0);

        store.init().unwrap();

        assert_eq!(stored_times(&store, id), vec!["sometime"]);
    }

    #[test]
    fn test_parse_time_text_variants() {
        let expected = at(2024, 1, 1, 5, 0);
        assert_eq!(parse_time_text("2024-01-01 05:00:00"), Some(expected));
        assert_eq!(parse_time_text("2024-01-01T05:00:00"), Some(expected));
        assert_eq!(parse_time_text("2024-01-01T05:00:00Z"), Some(expected));
        assert_eq!(parse_time_text("2024-01-01 06:00:00+01:00"), Some(expected));
        assert_eq!(parse_time_text("2024-01-01 05:00"), Some(expected));
        assert_eq!(parse_time_text("yesterday"), None);
    }

    #[test]
    fn test_decode_temperature_rejects_odd_blobs() {
        let result = decode_temperature(ValueRef::Blob(&[1, 2, 3]));
        assert!(matches!(result, Err(StoreError::Decode(_))));
    }
}
