//! Progress reporting on stderr using indicatif.

use img_triage_core::{ProgressEvent, ProgressSink, QualityLabel, QualityVerdict};
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle};
use tracing::debug;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}";

enum Display {
    /// Nothing is printed.
    Silent,
    /// A live bar; skips are still printed above it.
    Bar(IndicatifBar),
    /// One stderr line per flagged or skipped image.
    Lines,
}

/// Progress sink for the check command.
pub struct ProgressBar {
    display: Display,
}

impl ProgressBar {
    /// Creates a progress display.
    ///
    /// `quiet` wins over `show_bar`. Without a bar, flagged and skipped images
    /// are listed line by line.
    #[must_use]
    pub fn new(total: Option<u64>, quiet: bool, show_bar: bool) -> Self {
        let display = if quiet {
            Display::Silent
        } else if show_bar {
            let bar = total.map_or_else(IndicatifBar::new_spinner, IndicatifBar::new);
            if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
                bar.set_style(style.progress_chars("#>-"));
            }
            Display::Bar(bar)
        } else {
            Display::Lines
        };
        Self { display }
    }
}

fn describe(verdict: &QualityVerdict) -> String {
    verdict
        .labels()
        .into_iter()
        .map(QualityLabel::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ProgressSink for ProgressBar {
    fn on_event(&self, event: ProgressEvent) {
        match (&self.display, event) {
            (Display::Silent, _) => {}
            (Display::Bar(bar), ProgressEvent::Started { id, index, total }) => {
                debug!("Analyzing {id} ({})", index + 1);
                if let Some(t) = total {
                    bar.set_length(t as u64);
                }
                bar.set_message(id);
            }
            (Display::Bar(bar), ProgressEvent::Completed { .. }) => bar.inc(1),
            (Display::Bar(bar), ProgressEvent::Skipped { id, reason }) => {
                bar.inc(1);
                bar.suspend(|| eprintln!("WARN: Skipping {id}: {reason}"));
            }
            (Display::Bar(bar), ProgressEvent::Finished { processed, skipped }) => {
                bar.finish_with_message(format!("Done: {processed} processed, {skipped} skipped"));
            }
            (Display::Lines, ProgressEvent::Started { id, index, .. }) => {
                debug!("Analyzing {id} ({})", index + 1);
            }
            (Display::Lines, ProgressEvent::Completed { id, verdict }) => {
                if verdict.is_flagged() {
                    eprintln!("{id}: {}", describe(&verdict));
                }
            }
            (Display::Lines, ProgressEvent::Skipped { id, reason }) => {
                eprintln!("WARN: Skipping {id}: {reason}");
            }
            (Display::Lines, ProgressEvent::Finished { processed, skipped }) => {
                debug!("Done: {processed} processed, {skipped} skipped");
            }
        }
    }
}
