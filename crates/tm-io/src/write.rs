//! CSV writers.
//!
//! Column layouts mirror the readers in [`read`](crate::read), so every
//! written table can be loaded back.  Absent optional values are written as
//! empty fields.

use std::fmt::Display;
use std::fs::File;
use std::io;
use std::path::Path;

use chrono::SecondsFormat;
use csv::Writer;

use tm_core::{Positionfixes, Staypoints, Timestamp, Triplegs};

use crate::{IoResult, geom};

const POSITIONFIX_HEADER: [&str; 8] =
    ["id", "user_id", "tracked_at", "longitude", "latitude", "elevation", "staypoint_id", "tripleg_id"];
const STAYPOINT_HEADER: [&str; 6] = ["id", "user_id", "started_at", "finished_at", "elevation", "geom"];
const TRIPLEG_HEADER: [&str; 6] = ["id", "user_id", "started_at", "finished_at", "mode", "geom"];

pub fn write_positionfixes(path: &Path, pfs: &Positionfixes) -> IoResult<()> {
    write_positionfixes_to(File::create(path)?, pfs)?;
    tracing::debug!(path = %path.display(), rows = pfs.len(), "positionfixes written");
    Ok(())
}

/// Write fixes together with their `staypoint_id`/`tripleg_id` foreign keys.
pub fn write_positionfixes_to<W: io::Write>(w: W, pfs: &Positionfixes) -> IoResult<()> {
    let mut wtr = Writer::from_writer(w);
    wtr.write_record(POSITIONFIX_HEADER)?;
    for pf in &pfs.fixes {
        wtr.write_record(&[
            pf.id.to_string(),
            pf.user_id.to_string(),
            timestamp(pf.tracked_at),
            pf.geom.x().to_string(),
            pf.geom.y().to_string(),
            optional(pf.elevation),
            optional(pf.staypoint_id),
            optional(pf.tripleg_id),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_staypoints(path: &Path, sps: &Staypoints) -> IoResult<()> {
    write_staypoints_to(File::create(path)?, sps)?;
    tracing::debug!(path = %path.display(), rows = sps.len(), "staypoints written");
    Ok(())
}

pub fn write_staypoints_to<W: io::Write>(w: W, sps: &Staypoints) -> IoResult<()> {
    let mut wtr = Writer::from_writer(w);
    wtr.write_record(STAYPOINT_HEADER)?;
    for sp in &sps.items {
        wtr.write_record(&[
            sp.id.to_string(),
            sp.user_id.to_string(),
            timestamp(sp.started_at),
            timestamp(sp.finished_at),
            optional(sp.elevation),
            geom::encode_point(&sp.geom),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_triplegs(path: &Path, tpls: &Triplegs) -> IoResult<()> {
    write_triplegs_to(File::create(path)?, tpls)?;
    tracing::debug!(path = %path.display(), rows = tpls.len(), "triplegs written");
    Ok(())
}

pub fn write_triplegs_to<W: io::Write>(w: W, tpls: &Triplegs) -> IoResult<()> {
    let mut wtr = Writer::from_writer(w);
    wtr.write_record(TRIPLEG_HEADER)?;
    for tpl in &tpls.items {
        wtr.write_record(&[
            tpl.id.to_string(),
            tpl.user_id.to_string(),
            timestamp(tpl.started_at),
            timestamp(tpl.finished_at),
            optional(tpl.mode.as_deref()),
            geom::encode_linestring(&tpl.geom),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn timestamp(t: Timestamp) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn optional<T: Display>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}
