// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tablane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tablane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

pub const AUTO_BACKUP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Decides when the next automatic archive is due. The caller owns the clock.
#[derive(Debug, Clone)]
pub struct AutoBackup {
    interval: Duration,
    last_backup_at: Option<Instant>,
}

impl Default for AutoBackup {
    fn default() -> Self {
        Self::new(AUTO_BACKUP_INTERVAL)
    }
}

impl AutoBackup {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_backup_at: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Due when no archive was taken yet, or when at least one interval has elapsed.
    pub fn is_due(&self, now: Instant) -> bool {
        self.last_backup_at
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval)
    }

    pub fn record(&mut self, at: Instant) {
        self.last_backup_at = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::AutoBackup;

    #[test]
    fn first_backup_is_due_immediately() {
        assert!(AutoBackup::default().is_due(Instant::now()));
    }

    #[test]
    fn next_backup_waits_one_interval() {
        let start = Instant::now();
        let mut policy = AutoBackup::new(Duration::from_secs(60));
        policy.record(start);

        assert!(!policy.is_due(start));
        assert!(!policy.is_due(start + Duration::from_secs(59)));
        assert!(policy.is_due(start + Duration::from_secs(60)));
    }
}
