//! `tm-io`: CSV tables for positionfixes, staypoints and triplegs.
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`read`]   | `read_*` from a path or any `io::Read`, `ReadOptions`     |
//! | [`write`]  | `write_*` to a path or any `io::Write`                    |
//! | [`geom`]   | GeoJSON encoding of point and line geometry cells         |
//! | [`error`]  | `IoError`, `IoResult<T>`                                  |
//!
//! # Usage
//!
//! ```rust,ignore
//! use tm_io::{ReadOptions, read_positionfixes, write_staypoints};
//!
//! let pfs = read_positionfixes(Path::new("pfs.csv"), &ReadOptions::default())?;
//! let out = tm_staypoints::generate_staypoints(&pfs, &Default::default())?;
//! write_staypoints(Path::new("sp.csv"), &out.staypoints)?;
//! ```

pub mod error;
pub mod geom;
pub mod read;
pub mod write;


pub use error::{IoError, IoResult};
pub use read::{
    ReadOptions, read_positionfixes, read_positionfixes_from, read_staypoints, read_staypoints_from,
    read_triplegs, read_triplegs_from,
};
pub use write::{
    write_positionfixes, write_positionfixes_to, write_staypoints, write_staypoints_to, write_triplegs,
    write_triplegs_to,
};
