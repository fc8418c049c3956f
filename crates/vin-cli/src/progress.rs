use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

/// A stderr spinner that is a no-op when progress output is off.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }

    /// Run `future` under this spinner, clearing it on success and leaving
    /// `failure` behind on error.
    pub async fn track<T, E>(
        self,
        failure: &str,
        future: impl std::future::Future<Output = Result<T, E>>,
    ) -> Result<T, E> {
        let result = future.await;
        match &result {
            Ok(_) => self.finish_clear(),
            Err(_) => self.finish_err(failure),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::Progress;

    #[tokio::test]
    async fn track_passes_results_through_when_disabled() {
        let ok: Result<u8, String> = Progress::spinner("working")
            .track("failed", async { Ok(7) })
            .await;
        assert_eq!(ok, Ok(7));

        let err: Result<u8, String> = Progress::spinner("working")
            .track("failed", async { Err("boom".to_string()) })
            .await;
        assert_eq!(err, Err("boom".to_string()));
    }
}
