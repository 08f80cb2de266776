//! Read-through response cache keyed by coarse time bucket
//!
//! A value computed in bucket `now / ttl_secs` is served until the bucket
//! changes. There is no other invalidation.

use std::sync::Arc;
use tokio::sync::RwLock;

/// Whether a lookup was served from the cache
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

struct CachedEntry<T> {
    bucket: i64,
    value: Arc<T>,
}

/// Single-slot cache that expires when the time bucket rolls over
pub struct TimeBucketCache<T> {
    ttl_secs: u64,
    slot: RwLock<Option<CachedEntry<T>>>,
}

impl<T> TimeBucketCache<T> {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl_secs: ttl_secs.max(1),
            slot: RwLock::new(None),
        }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Bucket that `now` falls into
    pub fn bucket(&self, now: i64) -> i64 {
        now.div_euclid(self.ttl_secs as i64)
    }

    /// Return the value for `now`'s bucket, computing it on a miss
    pub async fn get_or_try_insert_with<F, E>(
        &self,
        now: i64,
        compute: F,
    ) -> Result<(Arc<T>, CacheStatus), E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let bucket = self.bucket(now);

        {
            let cache = self.slot.read().await;
            if let Some(entry) = &*cache {
                if entry.bucket == bucket {
                    return Ok((Arc::clone(&entry.value), CacheStatus::Hit));
                }
            }
        }

        let mut cache = self.slot.write().await;
        // Another request may have filled the bucket while we waited
        if let Some(entry) = &*cache {
            if entry.bucket == bucket {
                return Ok((Arc::clone(&entry.value), CacheStatus::Hit));
            }
        }

        let value = Arc::new(compute()?);
        *cache = Some(CachedEntry {
            bucket,
            value: Arc::clone(&value),
        });
        Ok((value, CacheStatus::Miss))
    }
}
