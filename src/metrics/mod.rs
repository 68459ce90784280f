//! Optional operation counters (enabled with the `metrics` feature).
//!
//! Recording is split from reading: the cache writes through
//! [`traits::LruMetricsRecorder`], callers read through
//! [`traits::MetricsSnapshotProvider`].

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
