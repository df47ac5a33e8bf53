//! Observability and Metrics
//!
//! Process-wide codec counters. Every counter is a relaxed atomic; the
//! values are diagnostic and never used for control flow.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info};

/// Global metrics collector for codec operations
#[derive(Debug)]
pub struct Metrics {
    /// Packets decoded into typed values
    pub packets_decoded: AtomicU64,
    /// Packets encoded from typed values
    pub packets_encoded: AtomicU64,
    /// Payload bytes consumed by decode
    pub bytes_decoded: AtomicU64,
    /// Payload bytes produced by encode
    pub bytes_encoded: AtomicU64,
    /// Decodes aborted by malformed or mismatched input
    pub decode_failures: AtomicU64,
    /// Unknown opcodes forwarded untouched
    pub passthrough_forwards: AtomicU64,
    /// Calls rejected by a capability gate
    pub gate_violations: AtomicU64,
    /// Field handles resolved against a host shape
    pub field_resolutions: AtomicU64,
    /// Lookups answered by the shared resolution cache
    pub resolution_cache_hits: AtomicU64,
    /// Enum types resolved against a host runtime
    pub enum_resolutions: AtomicU64,
    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            packets_decoded: AtomicU64::new(0),
            packets_encoded: AtomicU64::new(0),
            bytes_decoded: AtomicU64::new(0),
            bytes_encoded: AtomicU64::new(0),
            decode_failures: AtomicU64::new(0),
            passthrough_forwards: AtomicU64::new(0),
            gate_violations: AtomicU64::new(0),
            field_resolutions: AtomicU64::new(0),
            resolution_cache_hits: AtomicU64::new(0),
            enum_resolutions: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn packet_decoded(&self, byte_count: u64) {
        self.packets_decoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_decoded.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn packet_encoded(&self, byte_count: u64) {
        self.packets_encoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_encoded.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn passthrough(&self) {
        self.passthrough_forwards.fetch_add(1, Ordering::Relaxed);
    }

    pub fn gate_violation(&self) {
        self.gate_violations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn field_resolution(&self) {
        self.field_resolutions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn resolution_cache_hit(&self) {
        self.resolution_cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn enum_resolution(&self) {
        self.enum_resolutions.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            packets_decoded: self.packets_decoded.load(Ordering::Relaxed),
            packets_encoded: self.packets_encoded.load(Ordering::Relaxed),
            bytes_decoded: self.bytes_decoded.load(Ordering::Relaxed),
            bytes_encoded: self.bytes_encoded.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            passthrough_forwards: self.passthrough_forwards.load(Ordering::Relaxed),
            gate_violations: self.gate_violations.load(Ordering::Relaxed),
            field_resolutions: self.field_resolutions.load(Ordering::Relaxed),
            resolution_cache_hits: self.resolution_cache_hits.load(Ordering::Relaxed),
            enum_resolutions: self.enum_resolutions.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            packets_decoded = snapshot.packets_decoded,
            packets_encoded = snapshot.packets_encoded,
            bytes_decoded = snapshot.bytes_decoded,
            bytes_encoded = snapshot.bytes_encoded,
            decode_failures = snapshot.decode_failures,
            passthrough_forwards = snapshot.passthrough_forwards,
            gate_violations = snapshot.gate_violations,
            field_resolutions = snapshot.field_resolutions,
            resolution_cache_hits = snapshot.resolution_cache_hits,
            enum_resolutions = snapshot.enum_resolutions,
            uptime_seconds = snapshot.uptime_seconds,
            "Codec metrics snapshot"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub packets_decoded: u64,
    pub packets_encoded: u64,
    pub bytes_decoded: u64,
    pub bytes_encoded: u64,
    pub decode_failures: u64,
    pub passthrough_forwards: u64,
    pub gate_violations: u64,
    pub field_resolutions: u64,
    pub resolution_cache_hits: u64,
    pub enum_resolutions: u64,
    pub uptime_seconds: u64,
}

static METRICS: once_cell::sync::Lazy<Metrics> = once_cell::sync::Lazy::new(Metrics::new);

/// Get the global metrics instance
pub fn global_metrics() -> &'static Metrics {
    &METRICS
}

/// Timer for measuring operation duration
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!(
            operation = self.operation,
            duration_us = self.start.elapsed().as_micros() as u64,
            "Operation completed"
        );
    }
}
