//! CSV readers.
//!
//! | Table         | Required columns                                   | Optional columns                        |
//! |---------------|----------------------------------------------------|-----------------------------------------|
//! | positionfixes | `id,user_id,tracked_at,longitude,latitude`         | `elevation,staypoint_id,tripleg_id`     |
//! | staypoints    | `id,user_id,started_at,finished_at,geom`           | `elevation`                             |
//! | triplegs      | `id,user_id,started_at,finished_at,geom`           | `mode`                                  |
//!
//! Columns are matched by header name.  Timestamps are RFC 3339 with an
//! offset and are converted to UTC; geometries are GeoJSON objects.  Member lists
//! (`pfs_id`) are not stored in tables and come back empty.

use std::fs::File;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use geo::Point;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use tm_core::{
    Crs, Positionfix, PositionfixId, Positionfixes, Staypoint, StaypointId, Staypoints, Timestamp,
    Tripleg, TriplegId, Triplegs, UserId,
};

use crate::{IoError, IoResult, geom};

/// Settings shared by all readers.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadOptions {
    /// CRS attached to the loaded collection.
    pub crs:       Option<Crs>,
    pub delimiter: u8,
}

impl Default for ReadOptions {
    /// WGS-84, comma separated.
    fn default() -> Self {
        Self { crs: Some(Crs::WGS84), delimiter: b',' }
    }
}

impl ReadOptions {
    pub fn crs(mut self, crs: Option<Crs>) -> Self {
        self.crs = crs;
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn reader<R: io::Read>(&self, rdr: R) -> csv::Reader<R> {
        ReaderBuilder::new().delimiter(self.delimiter).trim(Trim::All).from_reader(rdr)
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PositionfixRow {
    id:           u64,
    user_id:      u64,
    tracked_at:   String,
    longitude:    f64,
    latitude:     f64,
    #[serde(default)]
    elevation:    Option<f64>,
    #[serde(default)]
    staypoint_id: Option<u64>,
    #[serde(default)]
    tripleg_id:   Option<u64>,
}

#[derive(Deserialize)]
struct StaypointRow {
    id:          u64,
    user_id:     u64,
    started_at:  String,
    finished_at: String,
    #[serde(default)]
    elevation:   Option<f64>,
    geom:        String,
}

#[derive(Deserialize)]
struct TriplegRow {
    id:          u64,
    user_id:     u64,
    started_at:  String,
    finished_at: String,
    #[serde(default)]
    mode:        Option<String>,
    geom:        String,
}

// ── Readers ───────────────────────────────────────────────────────────────────

pub fn read_positionfixes(path: &Path, opts: &ReadOptions) -> IoResult<Positionfixes> {
    let pfs = read_positionfixes_from(File::open(path)?, opts)?;
    tracing::debug!(path = %path.display(), rows = pfs.len(), "positionfixes read");
    Ok(pfs)
}

pub fn read_positionfixes_from<R: io::Read>(rdr: R, opts: &ReadOptions) -> IoResult<Positionfixes> {
    let fixes = rows(opts.reader(rdr), |line, row: PositionfixRow| {
        Ok(Positionfix {
            id:           PositionfixId(row.id),
            user_id:      UserId(row.user_id),
            tracked_at:   timestamp(line, &row.tracked_at)?,
            geom:         Point::new(row.longitude, row.latitude),
            elevation:    row.elevation,
            staypoint_id: row.staypoint_id.map(StaypointId),
            tripleg_id:   row.tripleg_id.map(TriplegId),
        })
    })?;
    Ok(Positionfixes::new(opts.crs, fixes))
}

pub fn read_staypoints(path: &Path, opts: &ReadOptions) -> IoResult<Staypoints> {
    let sps = read_staypoints_from(File::open(path)?, opts)?;
    tracing::debug!(path = %path.display(), rows = sps.len(), "staypoints read");
    Ok(sps)
}

pub fn read_staypoints_from<R: io::Read>(rdr: R, opts: &ReadOptions) -> IoResult<Staypoints> {
    let items = rows(opts.reader(rdr), |line, row: StaypointRow| {
        Ok(Staypoint {
            id:          StaypointId(row.id),
            user_id:     UserId(row.user_id),
            started_at:  timestamp(line, &row.started_at)?,
            finished_at: timestamp(line, &row.finished_at)?,
            geom:        geom::decode_point(&row.geom).map_err(|reason| bad_geometry(line, &row.geom, reason))?,
            elevation:   row.elevation,
            pfs_id:      Vec::new(),
        })
    })?;
    Ok(Staypoints::new(opts.crs, items))
}

/// Read a tripleg table, e.g. one written by
/// [`write_triplegs`](crate::write_triplegs) or a `;`-separated export.
pub fn read_triplegs(path: &Path, opts: &ReadOptions) -> IoResult<Triplegs> {
    let tpls = read_triplegs_from(File::open(path)?, opts)?;
    tracing::debug!(path = %path.display(), rows = tpls.len(), "triplegs read");
    Ok(tpls)
}

pub fn read_triplegs_from<R: io::Read>(rdr: R, opts: &ReadOptions) -> IoResult<Triplegs> {
    let items = rows(opts.reader(rdr), |line, row: TriplegRow| {
        Ok(Tripleg {
            id:          TriplegId(row.id),
            user_id:     UserId(row.user_id),
            started_at:  timestamp(line, &row.started_at)?,
            finished_at: timestamp(line, &row.finished_at)?,
            geom:        geom::decode_linestring(&row.geom).map_err(|reason| bad_geometry(line, &row.geom, reason))?,
            pfs_id:      Vec::new(),
            mode:        row.mode.filter(|m| !m.is_empty()),
        })
    })?;
    Ok(Triplegs::new(opts.crs, items))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Deserialize every record by header name and convert it with `f`, which
/// receives the 1-based line number for error reporting.
fn rows<R, T, U>(mut rdr: csv::Reader<R>, mut f: impl FnMut(u64, T) -> IoResult<U>) -> IoResult<Vec<U>>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let headers = rdr.headers()?.clone();
    let mut record = StringRecord::new();
    let mut out = Vec::new();
    while rdr.read_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        let row: T = record.deserialize(Some(&headers))?;
        out.push(f(line, row)?);
    }
    Ok(out)
}

fn timestamp(line: u64, value: &str) -> IoResult<Timestamp> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|source| IoError::Timestamp { line, value: value.to_owned(), source })
}

fn bad_geometry(line: u64, value: &str, reason: String) -> IoError {
    IoError::Geometry { line, value: value.to_owned(), reason }
}
