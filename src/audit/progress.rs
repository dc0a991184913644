// file: src/audit/progress.rs
// description: progress tracking and statistics reporting for an audit run
// reference: uses indicatif for progress bars and tracks per-run counters

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::cell::Cell;
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditStats {
    pub repositories_audited: usize,
    pub collaborators_classified: usize,
    pub failed_calls: usize,
    pub duration_secs: u64,
}

impl AuditStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories_per_second(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.repositories_audited as f64 / self.duration_secs as f64
    }
}

/// Counters for a single sequential run; the tracker is not shared across tasks.
pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    repositories_audited: Cell<usize>,
    collaborators_classified: Cell<usize>,
    failed_calls: Cell<usize>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn with_color(total_repositories: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();
        Self::build(multi_progress, total_repositories, colored)
    }

    /// Tracker that counts but never draws, for tests and non-interactive runs.
    pub fn hidden(total_repositories: usize) -> Self {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        Self::build(multi_progress, total_repositories, false)
    }

    fn build(multi_progress: MultiProgress, total: usize, colored: bool) -> Self {
        let main_bar = create_progress_bar(&multi_progress, total as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            repositories_audited: Cell::new(0),
            collaborators_classified: Cell::new(0),
            failed_calls: Cell::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn inc_repositories_audited(&self) {
        bump(&self.repositories_audited, 1);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn add_collaborators(&self, count: usize) {
        bump(&self.collaborators_classified, count);
    }

    pub fn inc_failed_calls(&self) {
        bump(&self.failed_calls, 1);
        self.update_detail_bar();
    }

    pub fn set_message(&self, message: String) {
        self.main_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_and_clear();
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> AuditStats {
        AuditStats {
            repositories_audited: self.repositories_audited.get(),
            collaborators_classified: self.collaborators_classified.get(),
            failed_calls: self.failed_calls.get(),
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }

    fn update_detail_bar(&self) {
        let collaborators = self.collaborators_classified.get();
        let failed = self.failed_calls.get();

        self.detail_bar.set_message(format!(
            "Collaborators: {} | Failed calls: {}",
            collaborators, failed
        ));
    }
}

fn bump(counter: &Cell<usize>, by: usize) {
    counter.set(counter.get().saturating_add(by));
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"
    };

    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        bar.set_style(style.progress_chars(if colored { "█▓▒░" } else { "=>-" }));
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
        bar.set_style(style);
    }
    bar
}
