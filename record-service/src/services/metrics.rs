//! Metrics collection and Prometheus export.
//!
//! HTTP request metrics come from `service_core::middleware::metrics`; this
//! module adds the record-level counters and renders everything for `/metrics`.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Calling it again is a no-op.
pub fn init_metrics() -> Result<(), AppError> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::InternalError(anyhow::anyhow!(
            "failed to install Prometheus recorder: {}",
            e
        ))
    })?;

    // Lost a race with another caller; theirs is the installed one.
    let _ = METRICS_HANDLE.set(handle);
    Ok(())
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_created() {
    counter!("records_created_total").increment(1);
}

pub fn record_updated() {
    counter!("records_updated_total").increment(1);
}

pub fn record_deleted() {
    counter!("records_deleted_total").increment(1);
}

pub fn file_uploaded(mime_type: &str) {
    counter!("files_uploaded_total", "mime_type" => mime_type.to_string()).increment(1);
}
