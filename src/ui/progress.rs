use crate::ui;
use colored::Colorize;
use std::io::{self, Write};
use std::time::Instant;
use terminal_size::{Width, terminal_size};

const MAX_BAR_WIDTH: usize = 40;
const MIN_BAR_WIDTH: usize = 10;

/// Percent progress for one install operation.
///
/// Redraws in place on a terminal; elsewhere each new step becomes its own
/// line so logs stay readable.
pub struct ProgressBar {
    label: String,
    percent: u8,
    step: String,
    start_time: Instant,
    width: usize,
    live: bool,
    finished: bool,
}

impl ProgressBar {
    pub fn new(label: &str) -> Self {
        let live = atty::is(atty::Stream::Stdout) && !ui::is_quiet();
        Self {
            label: label.to_string(),
            percent: 0,
            step: String::new(),
            start_time: Instant::now(),
            width: bar_width(label),
            live,
            finished: false,
        }
    }

    /// Move to `percent` (never backwards) and show `step`.
    pub fn set(&mut self, percent: u8, step: &str) {
        let changed_step = self.step != step;
        self.percent = percent.clamp(self.percent, 100);
        self.step = step.to_string();

        if self.live {
            self.draw();
        } else if changed_step && !ui::is_quiet() {
            ui::indent(&format!("[{:>3}%] {}", self.percent, self.step), 1);
        }
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Terminate the bar line.
    pub fn finish(mut self) {
        self.end_line();
    }

    fn end_line(&mut self) {
        if self.live && !self.finished {
            println!();
        }
        self.finished = true;
    }

    fn draw(&self) {
        let filled = (usize::from(self.percent) * self.width) / 100;
        let bar = "█".repeat(filled);
        let empty = "░".repeat(self.width.saturating_sub(filled));
        let elapsed = self.start_time.elapsed().as_secs();

        print!(
            "\r{} {} [{}{}] {:>3}% {} {}\x1b[K",
            "▸".dimmed(),
            self.label.cyan(),
            bar.green(),
            empty.dimmed(),
            self.percent,
            self.step,
            format!("({}s)", elapsed).dimmed()
        );

        io::stdout().flush().unwrap_or(());
    }
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        self.end_line();
    }
}

fn bar_width(label: &str) -> usize {
    let columns = terminal_size()
        .map(|(Width(w), _)| usize::from(w))
        .unwrap_or(80);
    // leave room for label, percentage and a short step text
    columns
        .saturating_sub(label.chars().count() + 40)
        .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}
