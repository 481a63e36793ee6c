//! Selection metrics: checkbox actions applied to the keyword set.

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};
use crate::selection::Action;

pub struct SelectionMetrics;

impl SelectionMetrics {
    pub fn record_action(kind: &'static str) {
        ::metrics::counter!(phase_metric!(counter, "selection", "actions"), "kind" => kind)
            .increment(1);
    }

    /// Action named a category the taxonomy does not know
    pub fn record_ignored_action() {
        ::metrics::counter!(phase_metric!(counter, "selection", "ignored_actions")).increment(1);
    }
}

impl PhaseMetrics for SelectionMetrics {
    fn register_metrics() {
        // only the labelled series are ever incremented
        for kind in Action::KINDS {
            let _ = ::metrics::counter!(phase_metric!(counter, "selection", "actions"), "kind" => kind);
        }
        let _ = ::metrics::counter!(phase_metric!(counter, "selection", "ignored_actions"));
    }

    fn phase_name() -> &'static str {
        "selection"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "selection", "actions"),
                metric_type: MetricType::Counter,
                help: "Checkbox actions applied, labelled by kind",
            },
            MetricDoc {
                name: phase_metric!(counter, "selection", "ignored_actions"),
                metric_type: MetricType::Counter,
                help: "Actions ignored because their category is unknown",
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn test_registers_one_series_per_action_kind() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        ::metrics::with_local_recorder(&recorder, || {
            SelectionMetrics::register_metrics();
            SelectionMetrics::record_action("check_main");
        });
        let rendered = handle.render();

        for kind in Action::KINDS {
            let series = format!("finder_selection_actions_total{{kind=\"{}\"}}", kind);
            assert!(rendered.contains(&series), "missing {} in\n{}", series, rendered);
        }
        assert!(rendered.contains("finder_selection_actions_total{kind=\"check_main\"} 1"));
        assert!(!rendered
            .lines()
            .any(|line| line.starts_with("finder_selection_actions_total ")));
    }
}
