//! Progress reporting for downloads and extraction.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Creates progress bars, or hidden ones when progress is disabled
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Byte progress for a download whose size is learned from the first callback
    pub fn create_download_bar(&self, name: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(name.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Spinner for steps without a measurable size
    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// Callback feeding `(downloaded, total)` into a download bar.
///
/// `total` is 0 when the server sent no Content-Length; the bar then only counts bytes.
pub fn download_callback(pb: &ProgressBar) -> impl Fn(u64, u64) + '_ {
    move |downloaded, total| {
        if total > 0 && pb.length() != Some(total) {
            pb.set_length(total);
        }
        pb.set_position(downloaded);
    }
}

/// Helper to format bytes for display
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.00 GB");
    }

    #[test]
    fn test_download_callback_sets_length() {
        let pb = ProgressBar::hidden();
        let callback = download_callback(&pb);

        callback(10, 0);
        assert_eq!(pb.position(), 10);

        callback(40, 100);
        assert_eq!(pb.length(), Some(100));
        assert_eq!(pb.position(), 40);
    }

    #[test]
    fn test_progress_manager_disabled() {
        let pm = ProgressManager::new(false);
        assert!(pm.create_download_bar("file").is_hidden());
    }
}
