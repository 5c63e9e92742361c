//! In-memory response cache in front of any [`HourlyTransport`].
//!
//! Successful responses are kept for a fixed TTL keyed on the full request;
//! errors are never cached.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use parking_lot::Mutex;

use crate::error::TransportError;
use crate::transport::{HourlyRequest, HourlyResponse, HourlyTransport};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    latitude_bits: u64,
    longitude_bits: u64,
    start_date: NaiveDate,
    end_date: NaiveDate,
    hourly: Vec<String>,
}

impl From<&HourlyRequest> for CacheKey {
    fn from(request: &HourlyRequest) -> Self {
        Self {
            latitude_bits: request.latitude.to_bits(),
            longitude_bits: request.longitude.to_bits(),
            start_date: request.start_date,
            end_date: request.end_date,
            hourly: request.hourly.clone(),
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    stored_at: Instant,
    responses: Vec<HourlyResponse>,
}

#[derive(Debug)]
pub struct CachedTransport<T> {
    inner: T,
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl<T: HourlyTransport> CachedTransport<T> {
    pub fn new(inner: T, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Number of entries currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn lookup(&self, key: &CacheKey) -> Option<Vec<HourlyResponse>> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.responses.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert a fresh entry, dropping every expired one on the way.
    fn store(&self, key: CacheKey, responses: Vec<HourlyResponse>) {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        if entries.len() < before {
            tracing::debug!("Evicted {} expired cache entries", before - entries.len());
        }
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                responses,
            },
        );
    }
}

impl<T: HourlyTransport> HourlyTransport for CachedTransport<T> {
    async fn fetch_hourly(&self, request: &HourlyRequest) -> Result<Vec<HourlyResponse>, TransportError> {
        let key = CacheKey::from(request);

        if let Some(hit) = self.lookup(&key) {
            tracing::debug!("Serving hourly response from cache");
            return Ok(hit);
        }

        let responses = self.inner.fetch_hourly(request).await?;
        if !self.ttl.is_zero() {
            self.store(key, responses.clone());
        }
        Ok(responses)
    }
}
