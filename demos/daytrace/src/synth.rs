//! Synthetic one-day GPS traces around Zurich.
//!
//! Every user follows the same itinerary (home, walk and bus to the office,
//! train to a meeting) from a random start offset and home location.  Fixes
//! are sampled every 30 s with a few metres of jitter, and about 2 % of them
//! are dropped to mimic signal loss.

use chrono::TimeDelta;
use geo::Point;
use rand::Rng;
use rand::rngs::SmallRng;

use tm_core::{Positionfix, PositionfixId, Timestamp, UserId};

const LAT0:         f64 = 47.3769;
const LON0:         f64 = 8.5417;
const M_PER_DEG:    f64 = 111_195.0;
const SAMPLE_SECS:  i64 = 30;
const JITTER_M:     f64 = 5.0;
const DROP_PROB:    f64 = 0.02;

enum Episode {
    /// Dwell in place.
    Stay { minutes: i64 },
    /// Travel `km` along a compass heading at constant speed.
    Move { km: f64, kmh: f64, heading_deg: f64 },
}

const ITINERARY: &[Episode] = &[
    Episode::Stay { minutes: 45 },                                // home
    Episode::Move { km: 0.8,  kmh: 5.0,   heading_deg: 90.0 },     // walk to the stop
    Episode::Move { km: 9.0,  kmh: 45.0,  heading_deg: 30.0 },     // bus
    Episode::Stay { minutes: 240 },                               // office
    Episode::Move { km: 60.0, kmh: 140.0, heading_deg: 300.0 },   // train
    Episode::Stay { minutes: 60 },                                // meeting
];

/// Generate `users` traces starting within 30 minutes after `day_start`.
/// Positionfix ids are unique across users.
pub fn generate(users: u64, day_start: Timestamp, rng: &mut SmallRng) -> Vec<Positionfix> {
    let mut fixes = Vec::new();
    for u in 0..users {
        let start = day_start + TimeDelta::seconds(rng.gen_range(0..1_800));
        let home = (rng.gen_range(-3_000.0..3_000.0), rng.gen_range(-3_000.0..3_000.0));
        user_day(UserId(u), start, home, rng, &mut fixes);
    }
    fixes
}

fn user_day(user: UserId, start: Timestamp, home: (f64, f64), rng: &mut SmallRng, out: &mut Vec<Positionfix>) {
    let (mut x, mut y) = home;
    let mut t = start;
    let step = TimeDelta::seconds(SAMPLE_SECS);

    for episode in ITINERARY {
        match *episode {
            Episode::Stay { minutes } => {
                for _ in 0..minutes * 60 / SAMPLE_SECS {
                    sample(user, t, (x, y), rng, out);
                    t += step;
                }
            }
            Episode::Move { km, kmh, heading_deg } => {
                let secs = km / kmh * 3_600.0;
                let steps = (secs / SAMPLE_SECS as f64).ceil() as i64;
                let (dx, dy) = {
                    let h = heading_deg.to_radians();
                    let d = km * 1_000.0 / steps as f64;
                    (d * h.sin(), d * h.cos())
                };
                for _ in 0..steps {
                    x += dx;
                    y += dy;
                    t += step;
                    sample(user, t, (x, y), rng, out);
                }
                t += step;
            }
        }
    }
}

fn sample(user: UserId, t: Timestamp, (x, y): (f64, f64), rng: &mut SmallRng, out: &mut Vec<Positionfix>) {
    if rng.gen_bool(DROP_PROB) {
        return;
    }
    let x = x + rng.gen_range(-JITTER_M..JITTER_M);
    let y = y + rng.gen_range(-JITTER_M..JITTER_M);
    let lon = LON0 + x / (M_PER_DEG * LAT0.to_radians().cos());
    let lat = LAT0 + y / M_PER_DEG;
    let id = PositionfixId(out.len() as u64);
    out.push(Positionfix::new(id, user, t, Point::new(lon, lat)));
}
