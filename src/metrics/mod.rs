//! Metrics for selection and filtering activity.
//!
//! Each area defines its own metrics in a dedicated submodule. The recorder is
//! installed in-process only; snapshots are rendered on demand (for example by
//! the CLI's `--print-metrics` flag) rather than scraped over HTTP.

pub mod filter;
pub mod selection;

pub use filter::FilterMetrics;
pub use selection::SelectionMetrics;

use std::sync::{Once, OnceLock};
use tracing::{debug, warn};

static INIT: Once = Once::new();
static HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder and register every metric.
///
/// Idempotent. Without this call the `metrics` macros are no-ops.
pub fn init_metrics() {
    INIT.call_once(|| {
        match metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                if HANDLE.set(handle).is_err() {
                    warn!("Metrics handle was already set");
                }
                SelectionMetrics::register_metrics();
                FilterMetrics::register_metrics();
                debug!("Prometheus recorder installed");
            }
            Err(e) => {
                warn!("Failed to install Prometheus recorder: {}", e);
            }
        }
    });
}

/// Render the current snapshot in Prometheus text format
pub fn render() -> Option<String> {
    HANDLE.get().map(|handle| handle.render())
}

/// Trait for area-specific metrics collections
pub trait PhaseMetrics {
    /// Register all metrics for this area
    fn register_metrics();

    /// Area name used as the metric prefix
    fn phase_name() -> &'static str;

    fn metrics_documentation() -> Vec<MetricDoc>;
}

/// Documentation for a single metric
#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Histogram,
}

/// Build a metric name following `finder_{phase}_{metric_name}[_total]`
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("finder_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("finder_", $phase, "_", $name)
    };
}

pub(crate) use phase_metric;
