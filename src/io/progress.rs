//! Attempt progress for batches of samples

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ATTEMPT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:20.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static FILES_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Samples: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Seed attempts made on one sample
#[derive(Debug, Clone, Default)]
struct SampleAttempts {
    label: String,
    made: usize,
    allowed: usize,
    outcome: String,
}

impl SampleAttempts {
    fn is_started(&self) -> bool {
        !self.label.is_empty()
    }

    fn draw(&self, bar: &ProgressBar) {
        bar.set_length(self.allowed as u64);
        bar.set_position(self.made as u64);
        bar.set_prefix(self.label.clone());
        bar.set_message(format!(
            "attempt {}/{}: {}",
            self.made, self.allowed, self.outcome
        ));
    }
}

/// Per-sample attempt bars, with a samples bar for large batches
///
/// Only the most recently started samples keep a bar of their own once a
/// batch has more than `MAX_INDIVIDUAL_PROGRESS_BARS` files.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    files_bar: Option<ProgressBar>,
    attempt_bars: Vec<ProgressBar>,
    samples: Vec<SampleAttempts>,
    file_count: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with no bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            files_bar: None,
            attempt_bars: Vec::new(),
            samples: Vec::new(),
            file_count: 0,
        }
    }

    /// Create the bars for a batch of `file_count` samples
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;
        self.samples = vec![SampleAttempts::default(); file_count];

        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let files_bar = ProgressBar::new(file_count as u64);
            files_bar.set_style(FILES_STYLE.clone());
            self.files_bar = Some(self.multi_progress.add(files_bar));
        }

        self.attempt_bars = (0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS))
            .map(|_| {
                let bar = ProgressBar::new(0);
                bar.set_style(ATTEMPT_STYLE.clone());
                self.multi_progress.add(bar)
            })
            .collect();
    }

    /// Number of samples in the batch
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Begin a sample that may use up to `attempts` seeds
    pub fn start_file(&mut self, index: usize, path: &Path, attempts: usize) {
        if index >= self.samples.len() {
            self.samples.resize(index + 1, SampleAttempts::default());
        }
        if let Some(sample) = self.samples.get_mut(index) {
            *sample = SampleAttempts {
                label: path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned(),
                made: 0,
                allowed: attempts,
                outcome: "solving".to_string(),
            };
        }
        self.redraw();
    }

    /// Record that attempt `attempt` (1-based) ended with `outcome`
    pub fn update_attempt(&mut self, index: usize, attempt: usize, outcome: &str) {
        if let Some(sample) = self.samples.get_mut(index) {
            sample.made = attempt;
            sample.outcome = outcome.to_string();
        }
        self.redraw();
    }

    /// Mark a sample as done and advance the samples bar
    pub fn complete_file(&mut self, index: usize, succeeded: bool, elapsed: Duration) {
        if let Some(ref files_bar) = self.files_bar {
            files_bar.inc(1);
        }

        if let Some(sample) = self.samples.get_mut(index) {
            let mark = if succeeded { "✓" } else { "✗" };
            sample.label = format!("{mark} {}", sample.label);
            sample.made = sample.allowed;
            sample.outcome = format!("{} in {:.1}s", sample.outcome, elapsed.as_secs_f64());
        }
        self.redraw();
    }

    /// Remove every bar from the terminal
    pub fn finish(&self) {
        if let Some(ref files_bar) = self.files_bar {
            files_bar.finish_with_message("All samples processed");
        }
        let _ = self.multi_progress.clear();
    }

    fn redraw(&self) {
        let started: Vec<&SampleAttempts> =
            self.samples.iter().filter(|s| s.is_started()).collect();
        let shown = started
            .get(started.len().saturating_sub(self.attempt_bars.len())..)
            .unwrap_or(&[]);

        for (position, bar) in self.attempt_bars.iter().enumerate() {
            match shown.get(position) {
                Some(sample) => sample.draw(bar),
                None => {
                    bar.set_length(0);
                    bar.set_position(0);
                    bar.set_prefix(String::new());
                    bar.set_message(String::new());
                }
            }
        }
    }
}
