//! Fixed-window rate limiting for the OTP endpoint.
//!
//! Keyed by source address: at most `max_requests` per window. Windows are
//! tracked in a mutexed map; expired entries are dropped opportunistically
//! on each check, so the map stays bounded by the number of distinct
//! sources seen within one window.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::domain::Error;

struct Window {
    started: Instant,
    count: u32,
}

/// Per-source fixed-window request limiter.
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    /// Build a limiter allowing `max_requests` per `window` per source.
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record one request from `source`, rejecting it over the ceiling.
    pub fn check(&self, source: &str) -> Result<(), Error> {
        self.check_at(source, Instant::now())
    }

    fn check_at(&self, source: &str, now: Instant) -> Result<(), Error> {
        let mut windows = self
            .windows
            .lock()
            .map_err(|_| Error::internal("rate limiter mutex poisoned"))?;

        windows.retain(|_, window| now.duration_since(window.started) < self.window);

        let window = windows.entry(source.to_owned()).or_insert(Window {
            started: now,
            count: 0,
        });
        if window.count >= self.max_requests {
            return Err(Error::too_many_requests(
                "Too many requests from this IP, please try again after 15 minutes",
            ));
        }
        window.count += 1;
        Ok(())
    }
}
