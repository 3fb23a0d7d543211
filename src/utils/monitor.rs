use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, System};

#[derive(Debug, Clone)]
pub struct StageStats {
    pub stage: String,
    pub records: usize,
    pub stage_time: Duration,
    pub total_time: Duration,
    pub memory_mb: Option<u64>,
}

/// Times each seed stage and, with the `cli` feature, samples process memory.
pub struct StageMonitor {
    enabled: bool,
    start_time: Instant,
    stage_start: Instant,
    peak_memory_mb: u64,
    #[cfg(feature = "cli")]
    system: System,
    #[cfg(feature = "cli")]
    pid: Option<Pid>,
}

impl StageMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            start_time: now,
            stage_start: now,
            peak_memory_mb: 0,
            #[cfg(feature = "cli")]
            system: System::new(),
            #[cfg(feature = "cli")]
            pid: sysinfo::get_current_pid().ok(),
        }
    }

    pub fn begin_stage(&mut self) {
        self.stage_start = Instant::now();
    }

    /// Closes the current stage. Returns `None` when monitoring is off.
    pub fn end_stage(&mut self, stage: &str, records: usize) -> Option<StageStats> {
        if !self.enabled {
            return None;
        }

        let memory_mb = self.sample_memory_mb();
        if let Some(mb) = memory_mb {
            self.peak_memory_mb = self.peak_memory_mb.max(mb);
        }

        let stats = StageStats {
            stage: stage.to_string(),
            records,
            stage_time: self.stage_start.elapsed(),
            total_time: self.start_time.elapsed(),
            memory_mb,
        };

        match stats.memory_mb {
            Some(mb) => tracing::info!(
                "📊 {} - {} records in {:?}, Memory: {}MB, Elapsed: {:?}",
                stats.stage,
                stats.records,
                stats.stage_time,
                mb,
                stats.total_time
            ),
            None => tracing::info!(
                "📊 {} - {} records in {:?}, Elapsed: {:?}",
                stats.stage,
                stats.records,
                stats.stage_time,
                stats.total_time
            ),
        }

        self.stage_start = Instant::now();
        Some(stats)
    }

    pub fn log_final_stats(&self) {
        if self.enabled {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                self.start_time.elapsed(),
                self.peak_memory_mb
            );
        }
    }

    #[cfg(feature = "cli")]
    fn sample_memory_mb(&mut self) -> Option<u64> {
        let pid = self.pid?;
        self.system.refresh_all();
        self.system
            .process(pid)
            .map(|process| process.memory() / 1024 / 1024)
    }

    #[cfg(not(feature = "cli"))]
    fn sample_memory_mb(&mut self) -> Option<u64> {
        None
    }
}

impl Default for StageMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_monitor_reports_nothing() {
        let mut monitor = StageMonitor::default();
        monitor.begin_stage();
        assert!(monitor.end_stage("categories", 6).is_none());
    }

    #[test]
    fn enabled_monitor_reports_stage() {
        let mut monitor = StageMonitor::new(true);
        monitor.begin_stage();
        let stats = monitor.end_stage("customizations", 18).unwrap();
        assert_eq!(stats.stage, "customizations");
        assert_eq!(stats.records, 18);
        assert!(stats.total_time >= stats.stage_time);
    }
}
