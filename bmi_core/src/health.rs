//! Liveness reporting for the health endpoint.

use crate::config::AppConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Memory figures in MiB, rounded to two decimals
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MemoryUsage {
    /// Resident memory of this process
    pub used: f64,
    /// Total memory of the host
    pub total: f64,
}

/// Body of `GET /api/health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the monitor was created
    pub uptime: f64,
    pub environment: String,
    pub version: String,
    pub memory: MemoryUsage,
}

/// Tracks process start time for health reports
#[derive(Debug, Clone)]
pub struct HealthMonitor {
    start_time: Instant,
    environment: String,
    version: String,
}

impl HealthMonitor {
    pub fn new(app: &AppConfig) -> Self {
        Self {
            start_time: Instant::now(),
            environment: app.environment.clone(),
            version: app.version.clone(),
        }
    }

    /// Collect a fresh report
    pub fn report(&self) -> HealthReport {
        HealthReport {
            status: "healthy",
            timestamp: Utc::now(),
            uptime: self.start_time.elapsed().as_secs_f64(),
            environment: self.environment.clone(),
            version: self.version.clone(),
            memory: memory_usage(),
        }
    }
}

fn memory_usage() -> MemoryUsage {
    let pid = Pid::from_u32(std::process::id());
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]));
    sys.refresh_memory();

    let used = sys.process(pid).map(|p| p.memory()).unwrap_or(0);

    MemoryUsage {
        used: to_mebibytes(used),
        total: to_mebibytes(sys.total_memory()),
    }
}

fn to_mebibytes(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 / 1024.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_fields() {
        let app = AppConfig {
            name: "BMI Calculator".into(),
            version: "2.3.4".into(),
            environment: "staging".into(),
        };
        let monitor = HealthMonitor::new(&app);
        let report = monitor.report();

        assert_eq!(report.status, "healthy");
        assert_eq!(report.version, "2.3.4");
        assert_eq!(report.environment, "staging");
        assert!(report.uptime >= 0.0);
        assert!(report.memory.total >= report.memory.used);
    }

    #[test]
    fn test_report_json_shape() {
        let monitor = HealthMonitor::new(&AppConfig::default());
        let json = serde_json::to_value(monitor.report()).unwrap();

        for key in ["status", "timestamp", "uptime", "environment", "version", "memory"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert!(json["memory"]["used"].is_number());
        assert!(json["memory"]["total"].is_number());
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_mebibyte_rounding() {
        assert_eq!(to_mebibytes(1024 * 1024), 1.0);
        assert_eq!(to_mebibytes(1_572_864), 1.5);
        assert_eq!(to_mebibytes(1_234_567), 1.18);
    }
}
