//! Lapse - an embeddable in-memory cache
//!
//! Entries expire after a configurable time-to-live (from write or from
//! last access), a deadline-ordered queue schedules them, and a background
//! reaper task collects them as they fall due. When the cache reaches its
//! maximum size it evicts the soonest-to-expire entries. Every removal is
//! reported to registered listeners with a typed [`RemovalCause`].
//!
//! ```
//! use std::time::Duration;
//! use lapse::{Cache, CacheBuilder};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> lapse::Result<()> {
//! let cache: Cache<String, String> = CacheBuilder::new("sessions")
//!     .expire_after_write(Duration::from_secs(60))?
//!     .build();
//! cache.start();
//!
//! cache.put("user:42".to_string(), "alice".to_string()).await?;
//! assert_eq!(
//!     cache.get_if_present(&"user:42".to_string())?,
//!     Some("alice".to_string())
//! );
//!
//! cache.stop();
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
pub mod removal;

mod tasks;

pub use builder::CacheBuilder;
pub use cache::{Cache, CacheEntry, DelayElement, ExpiryQueue, EVICTION_BATCH};
pub use config::{
    CacheConfig, DEFAULT_EXPIRE_AFTER_WRITE, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAXIMUM_SIZE,
};
pub use error::{CacheError, Result};
pub use removal::{RemovalCause, RemovalListener, RemovalNotification};
