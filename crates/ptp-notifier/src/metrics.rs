//! Emission counters
//!
//! Thread-safe counters shared by every emission site. Informational only:
//! nothing in the notifier reacts to them.
//!
//! ## Usage
//!
//! ```ignore
//! use ptp_notifier::metrics::{EmissionMetrics, EmissionSite};
//!
//! let metrics = EmissionMetrics::new();
//! metrics.record_success(EmissionSite::Periodic);
//! assert_eq!(metrics.snapshot().periodic_emitted, 1);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::EmitError;

/// Where an emission originated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmissionSite {
    /// The immediate event sent during startup
    Startup,
    /// A tick of the periodic emitter
    Periodic,
    /// A response to an inbound status request
    StatusRequest,
}

impl EmissionSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmissionSite::Startup => "startup",
            EmissionSite::Periodic => "periodic",
            EmissionSite::StatusRequest => "status",
        }
    }
}

impl fmt::Display for EmissionSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters for emission outcomes
#[derive(Default, Debug)]
pub struct EmissionMetrics {
    /// Events delivered during startup
    pub startup_emitted: AtomicU64,
    /// Events delivered on periodic ticks
    pub periodic_emitted: AtomicU64,
    /// Events delivered in response to status requests
    pub status_emitted: AtomicU64,
    /// Delivery failures across all sites
    pub delivery_failures: AtomicU64,
    /// Event construction failures across all sites
    pub build_failures: AtomicU64,
    /// Failures since the last successful emission
    pub consecutive_failures: AtomicU64,
    /// Timer ticks observed by the periodic emitter
    pub ticks: AtomicU64,
}

impl EmissionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a delivered event
    pub fn record_success(&self, site: EmissionSite) {
        let counter = match site {
            EmissionSite::Startup => &self.startup_emitted,
            EmissionSite::Periodic => &self.periodic_emitted,
            EmissionSite::StatusRequest => &self.status_emitted,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.consecutive_failures.store(0, Ordering::Relaxed);
    }

    /// Record a failed emission
    pub fn record_failure(&self, error: &EmitError) {
        match error {
            EmitError::Build(_) => self.build_failures.fetch_add(1, Ordering::Relaxed),
            EmitError::Delivery(_) => self.delivery_failures.fetch_add(1, Ordering::Relaxed),
        };
        self.consecutive_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a point-in-time snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            startup_emitted: self.startup_emitted.load(Ordering::Relaxed),
            periodic_emitted: self.periodic_emitted.load(Ordering::Relaxed),
            status_emitted: self.status_emitted.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
            build_failures: self.build_failures.load(Ordering::Relaxed),
            consecutive_failures: self.consecutive_failures.load(Ordering::Relaxed),
            ticks: self.ticks.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`EmissionMetrics`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub startup_emitted: u64,
    pub periodic_emitted: u64,
    pub status_emitted: u64,
    pub delivery_failures: u64,
    pub build_failures: u64,
    pub consecutive_failures: u64,
    pub ticks: u64,
}

impl MetricsSnapshot {
    /// Events delivered across all sites
    pub fn total_emitted(&self) -> u64 {
        self.startup_emitted + self.periodic_emitted + self.status_emitted
    }

    /// Failed emissions across all sites
    pub fn total_failures(&self) -> u64 {
        self.delivery_failures + self.build_failures
    }
}
