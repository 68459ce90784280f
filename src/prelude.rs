pub use crate::builder::LruCacheBuilder;
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{snapshot::LruMetricsSnapshot, traits::MetricsSnapshotProvider};
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};
