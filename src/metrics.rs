use std::sync::Mutex;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
///
/// Only one recorder can exist per process, so later calls return the
/// handle installed by the first one.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let mut slot = HANDLE
        .lock()
        .map_err(|_| anyhow::anyhow!("metrics handle lock poisoned"))?;
    if let Some(handle) = slot.as_ref() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;

    // Pre-register counters so they appear even before the first increment.
    counter!("payable_adjustments_total").absolute(0);
    counter!("payable_adjustments_rejected").absolute(0);
    counter!("price_updates_total").absolute(0);
    counter!("price_update_failures").absolute(0);

    gauge!("funds_tracked").set(0.0);

    *slot = Some(handle.clone());
    Ok(handle)
}
