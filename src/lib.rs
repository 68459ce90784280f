//! lrukit: a fixed-capacity least-recently-used cache.
//!
//! [`LruCache`] pairs a hash index with a recency list stored in a slot
//! arena. Both structures address entries by [`SlotId`], so lookups,
//! promotions and evictions are O(1) without shared references between them.
//!
//! ```
//! use lrukit::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//! cache.put("c", 3); // evicts "b"
//! assert!(!cache.contains(&"b"));
//! ```
//!
//! The cache is single-threaded; see [`policy::lru`] for how to share one.

pub mod builder;
pub mod ds;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod traits;

pub use crate::builder::LruCacheBuilder;
pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LruMetricsSnapshot;
pub use crate::policy::lru::LruCache;
