//! Multi-level progress tracking with automatic batching for large runs

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Per-level display state shown in the rolling window
#[derive(Clone, Debug, Default)]
struct LevelState {
    name: String,
    stage: usize,
    stages: usize,
}

/// Coordinates progress display for batch generation
///
/// Small batches get one bar per level showing its generation stage; larger
/// batches add a single batch bar and show only the most recent levels
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    level_bars: Vec<ProgressBar>,
    level_count: usize,
    level_states: Vec<LevelState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Levels: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            level_bars: Vec::new(),
            level_count: 0,
            level_states: Vec::new(),
        }
    }

    /// Number of levels announced by `initialize`
    pub const fn level_count(&self) -> usize {
        self.level_count
    }

    /// Create progress bars for `level_count` levels
    pub fn initialize(&mut self, level_count: usize) {
        self.level_count = level_count;

        if level_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(level_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = level_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(STAGE_STYLE.clone());
            self.level_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Register a level that is about to go through `stages` stages
    pub fn start_level(&mut self, index: usize, name: &str, stages: usize) {
        if index >= self.level_states.len() {
            self.level_states.resize(index + 1, LevelState::default());
        }
        if let Some(state) = self.level_states.get_mut(index) {
            *state = LevelState {
                name: name.to_string(),
                stage: 0,
                stages,
            };
        }
        self.update_bars();
    }

    /// Report that `stage` stages of a level have finished
    pub fn update_stage(&mut self, index: usize, stage: usize) {
        if let Some(state) = self.level_states.get_mut(index) {
            state.stage = stage.min(state.stages);
        }
        self.update_bars();
    }

    /// Mark a level as completed and advance the batch bar
    pub fn complete_level(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.level_states.get_mut(index) {
            state.name = format!("✓ {}", state.name);
            state.stage = state.stages;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All levels generated");
        }
        let _ = self.multi_progress.clear();
    }

    // Shows the last MAX_INDIVIDUAL_PROGRESS_BARS started levels
    fn update_bars(&self) {
        let active: Vec<&LevelState> = self
            .level_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, state) in visible.iter().enumerate() {
            if let Some(bar) = self.level_bars.get(bar_idx) {
                bar.set_length(state.stages as u64);
                bar.set_position(state.stage as u64);
                bar.set_message(format!("{}/{}", state.stage, state.stages));
                bar.set_prefix(state.name.clone());
            }
        }

        for bar in self.level_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
