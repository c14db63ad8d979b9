//! Prometheus metrics for the search pipeline and the web page
//!
//! The recorder is installed once; the handle is kept so `/metrics` can render
//! in-process without a separate exporter listener.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Once, OnceLock};
use std::time::Instant;
use tracing::{info, warn};

pub const DIRECTORY_REQUESTS: &str = "meetup_directory_requests_total";
pub const DIRECTORY_REQUEST_DURATION: &str = "meetup_directory_request_duration_seconds";
pub const CATALOG_GROUPS: &str = "meetup_catalog_groups";
pub const PAGE_RENDERS: &str = "meetup_page_renders_total";

static INIT: Once = Once::new();
static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Idempotent.
pub fn init_metrics() {
    INIT.call_once(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if HANDLE.set(handle).is_err() {
                warn!("Metrics handle already set");
            }
            info!("Prometheus recorder installed");
        }
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
        }
    });
}

/// Text exposition of every recorded metric, or `None` before `init_metrics`.
pub fn render() -> Option<String> {
    HANDLE.get().map(|handle| handle.render())
}

pub mod directory {
    use super::{DIRECTORY_REQUESTS, DIRECTORY_REQUEST_DURATION};

    pub fn request_succeeded() {
        ::metrics::counter!(DIRECTORY_REQUESTS, "outcome" => "success").increment(1);
    }

    pub fn request_failed(outcome: &'static str) {
        ::metrics::counter!(DIRECTORY_REQUESTS, "outcome" => outcome).increment(1);
    }

    pub fn time_request() -> super::TimingGuard {
        super::TimingGuard::new(DIRECTORY_REQUEST_DURATION)
    }
}

pub mod catalog {
    pub fn groups_built(count: usize) {
        ::metrics::histogram!(super::CATALOG_GROUPS).record(count as f64);
    }
}

pub mod page {
    pub fn rendered(outcome: &'static str) {
        ::metrics::counter!(super::PAGE_RENDERS, "outcome" => outcome).increment(1);
    }
}

/// Records the elapsed time into a histogram when dropped, on every exit path.
pub struct TimingGuard {
    start: Instant,
    histogram_name: &'static str,
}

impl TimingGuard {
    pub fn new(histogram_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            histogram_name,
        }
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        ::metrics::histogram!(self.histogram_name).record(duration);
    }
}
