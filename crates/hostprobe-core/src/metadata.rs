//! Metric descriptor catalog.

use crate::metric::{Metric, Sum, Temporality};

/// Data point label carrying the logical process status.
pub const STATUS_LABEL: &str = "status";

/// Static description of a metric: name, unit and sum shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
    /// Metric name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// UCUM unit.
    pub unit: &'static str,
    /// Whether the sum is monotonic.
    pub is_monotonic: bool,
}

impl MetricDescriptor {
    /// Creates an empty metric initialized from this descriptor.
    #[must_use]
    pub fn new_metric(&self) -> Metric {
        Metric {
            name: self.name.to_string(),
            description: self.description.to_string(),
            unit: self.unit.to_string(),
            sum: Sum {
                is_monotonic: self.is_monotonic,
                temporality: Temporality::Cumulative,
                data_points: Vec::new(),
            },
        }
    }
}

/// `system.processes.count`
pub const SYSTEM_PROCESSES_COUNT: MetricDescriptor = MetricDescriptor {
    name: "system.processes.count",
    description: "Total number of processes in each state.",
    unit: "{processes}",
    is_monotonic: false,
};

/// `system.processes.created`
pub const SYSTEM_PROCESSES_CREATED: MetricDescriptor = MetricDescriptor {
    name: "system.processes.created",
    description: "Total number of created processes.",
    unit: "{processes}",
    is_monotonic: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metric_shape() {
        let metric = SYSTEM_PROCESSES_CREATED.new_metric();
        assert_eq!(metric.name, "system.processes.created");
        assert_eq!(metric.unit, "{processes}");
        assert!(metric.sum.is_monotonic);
        assert_eq!(metric.sum.temporality, Temporality::Cumulative);
        assert!(metric.data_points().is_empty());
    }

    #[test]
    fn test_count_is_not_monotonic() {
        assert!(!SYSTEM_PROCESSES_COUNT.new_metric().sum.is_monotonic);
    }
}
