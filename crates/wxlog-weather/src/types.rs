use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single temperature observation.
///
/// `temp_c` is `None` when the feed had no valid sample for that hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub time: DateTime<Utc>,
    pub temp_c: Option<f64>,
}

impl Reading {
    pub fn new(time: DateTime<Utc>, temp_c: Option<f64>) -> Self {
        Self { time, temp_c }
    }
}

/// A reading as produced by the fetcher, tagged with the queried
/// coordinates and the feed it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedReading {
    pub time: DateTime<Utc>,
    pub temp_c: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    pub source: String,
}

impl FetchedReading {
    pub fn reading(&self) -> Reading {
        Reading::new(self.time, self.temp_c)
    }
}

impl From<FetchedReading> for Reading {
    fn from(r: FetchedReading) -> Self {
        Reading::new(r.time, r.temp_c)
    }
}
