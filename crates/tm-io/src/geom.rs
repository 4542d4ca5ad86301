//! Geometry column codec.
//!
//! Each geometry cell holds one GeoJSON geometry object, for example
//! `{"coordinates":[[8.5,47.0],[8.5,47.01]],"type":"LineString"}`.  A
//! `Feature` wrapping a geometry is accepted on read.

use geo::{LineString, Point};
use geojson::{GeoJson, Geometry, Value};

pub fn encode_point(p: &Point<f64>) -> String {
    Geometry::new(Value::from(p)).to_string()
}

pub fn encode_linestring(line: &LineString<f64>) -> String {
    Geometry::new(Value::from(line)).to_string()
}

pub fn decode_point(s: &str) -> Result<Point<f64>, String> {
    decode_value(s)?.try_into().map_err(|e: geojson::Error| e.to_string())
}

pub fn decode_linestring(s: &str) -> Result<LineString<f64>, String> {
    decode_value(s)?.try_into().map_err(|e: geojson::Error| e.to_string())
}

fn decode_value(s: &str) -> Result<Value, String> {
    let geojson: GeoJson = s.parse().map_err(|e: geojson::Error| e.to_string())?;
    match geojson {
        GeoJson::Geometry(g) => Ok(g.value),
        GeoJson::Feature(f) => f.geometry.map(|g| g.value).ok_or_else(|| "feature has no geometry".to_owned()),
        GeoJson::FeatureCollection(_) => Err("expected a single geometry, got a feature collection".to_owned()),
    }
}
