use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named place readings are stored against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: Option<DateTime<Utc>>,
}
