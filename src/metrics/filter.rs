//! Filter metrics: keyword passes over the organisation directory.

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct FilterMetrics;

impl FilterMetrics {
    pub fn record_filter_run(passes: usize, input_records: usize, results: usize) {
        ::metrics::counter!(phase_metric!(counter, "filter", "runs")).increment(1);
        ::metrics::counter!(phase_metric!(counter, "filter", "keyword_passes"))
            .increment(passes as u64);
        ::metrics::histogram!(phase_metric!(histogram, "filter", "input_records"))
            .record(input_records as f64);
        ::metrics::histogram!(phase_metric!(histogram, "filter", "results")).record(results as f64);
    }
}

impl PhaseMetrics for FilterMetrics {
    fn register_metrics() {
        let _ = ::metrics::counter!(phase_metric!(counter, "filter", "runs"));
        let _ = ::metrics::counter!(phase_metric!(counter, "filter", "keyword_passes"));
        let _ = ::metrics::histogram!(phase_metric!(histogram, "filter", "input_records"));
        let _ = ::metrics::histogram!(phase_metric!(histogram, "filter", "results"));
    }

    fn phase_name() -> &'static str {
        "filter"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "filter", "runs"),
                metric_type: MetricType::Counter,
                help: "Number of filter runs over the dataset",
            },
            MetricDoc {
                name: phase_metric!(counter, "filter", "keyword_passes"),
                metric_type: MetricType::Counter,
                help: "Number of individual keyword passes",
            },
            MetricDoc {
                name: phase_metric!(histogram, "filter", "input_records"),
                metric_type: MetricType::Histogram,
                help: "Records considered per filter run",
            },
            MetricDoc {
                name: phase_metric!(histogram, "filter", "results"),
                metric_type: MetricType::Histogram,
                help: "Records remaining after all keyword passes",
            },
        ]
    }
}
