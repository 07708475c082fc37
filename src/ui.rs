use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::{Duration, Instant};

use pose_wall::{MatchResult, PoseDefinition};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiMode {
    Auto,
    Plain,
    Pretty,
}

/// Terminal presentation for the command-line game loop.
#[derive(Clone, Debug)]
pub struct Ui {
    mode: UiMode,
    is_tty: bool,
    disable_pretty: bool,
}

impl Ui {
    pub fn new(mode: UiMode, is_tty: bool, disable_pretty: bool) -> Self {
        Self {
            mode,
            is_tty,
            disable_pretty,
        }
    }

    pub fn from_args(ui_flag: Option<&str>, is_tty: bool, disable_pretty: bool) -> Self {
        let mode = match ui_flag {
            Some("plain") => UiMode::Plain,
            Some("pretty") => UiMode::Pretty,
            _ => UiMode::Auto,
        };
        Self::new(mode, is_tty, disable_pretty)
    }

    pub fn is_pretty(&self) -> bool {
        self.is_tty
            && match self.mode {
                UiMode::Pretty => true,
                UiMode::Auto => !self.disable_pretty,
                UiMode::Plain => false,
            }
    }

    /// Start the countdown display for a round.
    pub fn round(&self, number: u32, pose: &PoseDefinition, duration_ms: u64) -> RoundHud {
        let label = format!("round {number}: {} {}", pose.icon, pose.name);
        if self.is_pretty() {
            let bar = ProgressBar::new(duration_ms);
            bar.set_draw_target(ProgressDrawTarget::stderr());
            bar.set_style(countdown_style("{msg} [{bar:30.cyan/blue}] {prefix}"));
            bar.set_message(label.clone());
            bar.set_prefix(format_remaining(duration_ms));
            RoundHud::new(label, duration_ms, Some(bar))
        } else {
            eprintln!("==> {} ({})", label, pose.description);
            RoundHud::new(label, duration_ms, None)
        }
    }
}

fn countdown_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

/// Live countdown for one round. Dropping it without `finish` clears the bar.
pub struct RoundHud {
    label: String,
    duration_ms: u64,
    start: Instant,
    warned: bool,
    bar: Option<ProgressBar>,
}

impl RoundHud {
    fn new(label: String, duration_ms: u64, bar: Option<ProgressBar>) -> Self {
        Self {
            label,
            duration_ms,
            start: Instant::now(),
            warned: false,
            bar,
        }
    }

    pub fn update(&mut self, remaining_ms: u64, warning: bool) {
        if let Some(bar) = &self.bar {
            bar.set_position(self.duration_ms.saturating_sub(remaining_ms));
            bar.set_prefix(format_remaining(remaining_ms));
        }
        if warning && !self.warned {
            self.warned = true;
            match &self.bar {
                Some(bar) => {
                    bar.set_style(countdown_style("{msg} [{bar:30.red/yellow}] {prefix}"))
                }
                None => eprintln!("    hurry! {} left", format_remaining(remaining_ms)),
            }
        }
    }

    pub fn finish(mut self, result: &MatchResult) {
        let verdict = if result.matched { "✔" } else { "✘" };
        let message = format!(
            "{} {} - {} (+{}) in {}",
            verdict,
            self.label,
            result.feedback,
            result.score,
            format_duration(self.start.elapsed())
        );
        match self.bar.take() {
            Some(bar) => bar.finish_with_message(message),
            None => eprintln!("{message}"),
        }
    }
}

impl Drop for RoundHud {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

fn format_remaining(ms: u64) -> String {
    format!("{:.1}s", ms as f64 / 1000.0)
}

fn format_duration(duration: Duration) -> String {
    if duration.as_secs() >= 1 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        format!("{}ms", duration.as_millis())
    }
}
