//! Cache administration: warmup, flush and reporting

use hotelix_domain::constants::WARMUP_PERIODS;
use hotelix_domain::Result;
use tracing::{error, info};

use super::cache::{CacheReport, CachedStatsService};

pub struct CacheManager {
    stats: CachedStatsService,
}

impl CacheManager {
    pub fn new(stats: CachedStatsService) -> Self {
        Self { stats }
    }

    /// Prime the global stats of a hotel for the whole history, 7 and 30
    /// days. Stops at the first failure.
    pub async fn warmup(&self, hotel_id: i64) -> Result<()> {
        for period_days in WARMUP_PERIODS {
            if let Err(err) = self.stats.global_stats(hotel_id, period_days).await {
                error!(hotel_id, ?period_days, error = %err, "stats cache warmup failed");
                return Err(err);
            }
        }
        info!(hotel_id, entries = WARMUP_PERIODS.len(), "stats cache warmed up");
        Ok(())
    }

    pub fn clear_all(&self) {
        self.stats.cache().invalidate_all();
        info!("stats cache flushed");
    }

    pub fn stats(&self) -> CacheReport {
        self.stats.cache().report()
    }
}
