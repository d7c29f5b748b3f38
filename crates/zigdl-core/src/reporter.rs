//! Reporter trait for dependency injection
//!
//! Download progress and per-mirror failures are reported through this trait
//! so the core stays independent of how the caller displays them.

/// Receives download progress and diagnostics.
pub trait Reporter: Send + Sync {
    /// A download attempt against `url` is starting.
    fn download_started(&self, url: &str, total: Option<u64>);

    /// `current` bytes have been received so far. `total` is `None` when the
    /// size is unknown.
    fn downloading(&self, url: &str, current: u64, total: Option<u64>);

    /// The attempt against `url` finished and its digest matched.
    fn verified(&self, url: &str, bytes: u64);

    /// A mirror attempt failed; the next mirror (or the origin) is tried.
    fn mirror_failed(&self, url: &str, reason: &str);

    /// All mirrors failed and the origin URL is being used.
    fn falling_back(&self, origin: &str);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn download_started(&self, url: &str, total: Option<u64>) {
        (**self).download_started(url, total);
    }
    fn downloading(&self, url: &str, current: u64, total: Option<u64>) {
        (**self).downloading(url, current, total);
    }
    fn verified(&self, url: &str, bytes: u64) {
        (**self).verified(url, bytes);
    }
    fn mirror_failed(&self, url: &str, reason: &str) {
        (**self).mirror_failed(url, reason);
    }
    fn falling_back(&self, origin: &str) {
        (**self).falling_back(origin);
    }
}

/// Percentage of `current` over `total`, or `None` when the size is unknown.
pub fn progress_percentage(current: u64, total: Option<u64>) -> Option<f64> {
    match total {
        Some(total) if total > 0 => Some(current as f64 / total as f64 * 100.0),
        _ => None,
    }
}

/// Logs everything through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn download_started(&self, url: &str, total: Option<u64>) {
        tracing::info!(url, size = total.unwrap_or(0), "Begin download");
    }

    fn downloading(&self, url: &str, current: u64, total: Option<u64>) {
        match progress_percentage(current, total) {
            Some(pct) => tracing::info!(
                url,
                "Downloaded: {current}/{} bytes ({pct:.2}%)",
                total.unwrap_or(0)
            ),
            None => tracing::info!(url, "Downloaded: {current} bytes"),
        }
    }

    fn verified(&self, url: &str, bytes: u64) {
        tracing::info!(url, bytes, "Shasum verified");
    }

    fn mirror_failed(&self, url: &str, reason: &str) {
        tracing::warn!(url, "Current mirror failed, try next. err: {reason}");
    }

    fn falling_back(&self, origin: &str) {
        tracing::warn!(origin, "All mirrors failed, falling back to origin");
    }
}

/// A no-op reporter for silent operations (e.g., testing).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn download_started(&self, _: &str, _: Option<u64>) {}
    fn downloading(&self, _: &str, _: u64, _: Option<u64>) {}
    fn verified(&self, _: &str, _: u64) {}
    fn mirror_failed(&self, _: &str, _: &str) {}
    fn falling_back(&self, _: &str) {}
}
