//! Progress reporting for debate execution

use colored::Colorize;
use council_application::DebateProgressNotifier;
use council_domain::{ResponseUnit, Stage};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during a debate with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    seats: Mutex<u64>,
    round_bar: Mutex<Option<ProgressBar>>,
    synthesis_spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            seats: Mutex::new(0),
            round_bar: Mutex::new(None),
            synthesis_spinner: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.magenta} {prefix:.bold.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn status(response: &ResponseUnit) -> String {
        if response.is_error() {
            format!("{} {}", "x".red(), response.agent_name)
        } else {
            format!("{} {}", "v".green(), response.agent_name)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateProgressNotifier for ProgressReporter {
    fn on_debate_start(&self, topic: &str, total_rounds: u32, participants: &[String]) {
        if let Ok(mut seats) = self.seats.lock() {
            *seats = participants.len() as u64;
        }
        let _ = self.multi.println(format!(
            "{} {}\n{} {} | {} {}\n",
            "Topic:".cyan().bold(),
            topic,
            "Council:".cyan().bold(),
            participants.join(", "),
            "Rounds:".cyan().bold(),
            total_rounds
        ));
    }

    fn on_round_start(&self, round: u32, total_rounds: u32) {
        let seats = self.seats.lock().map(|s| *s).unwrap_or(0);
        let pb = self.multi.add(ProgressBar::new(seats));
        pb.set_style(Self::round_style());
        pb.set_prefix(format!("Round {}/{}", round, total_rounds));
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut bar) = self.round_bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_agent_start(&self, agent: &str, _stage: Stage) {
        if let Ok(bar) = self.round_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(format!("{} thinking...", agent));
        }
    }

    fn on_agent_complete(&self, response: &ResponseUnit, _stage: Stage) {
        if let Ok(bar) = self.round_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(Self::status(response));
            pb.inc(1);
        }
    }

    fn on_round_complete(&self, round: u32) {
        if let Ok(mut bar) = self.round_bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!("Round {} complete!", round).green().to_string());
        }
    }

    fn on_synthesis_start(&self, synthesizer: &str) {
        let spinner = self.multi.add(ProgressBar::new_spinner());
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix("Synthesis");
        spinner.set_message(format!("{} is writing the article...", synthesizer));
        spinner.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut slot) = self.synthesis_spinner.lock() {
            *slot = Some(spinner);
        }
    }

    fn on_synthesis_complete(&self, synthesis: &ResponseUnit) {
        if let Ok(mut slot) = self.synthesis_spinner.lock()
            && let Some(spinner) = slot.take()
        {
            let message = if synthesis.is_error() {
                "synthesis failed".red().to_string()
            } else {
                "done!".green().to_string()
            };
            spinner.finish_with_message(message);
        }
    }
}

/// Simple text-based progress (no fancy UI)
///
/// Writes to stderr by default so stdout carries only the debate output.
pub struct SimpleProgress {
    out: Mutex<Box<dyn Write + Send>>,
}

impl SimpleProgress {
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }

    fn line(&self, text: impl std::fmt::Display) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", text);
        }
    }
}

impl Default for SimpleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateProgressNotifier for SimpleProgress {
    fn on_debate_start(&self, topic: &str, total_rounds: u32, participants: &[String]) {
        self.line(format!("{} {}", "Topic:".bold(), topic));
        self.line(format!(
            "{} {} ({} rounds)",
            "Council:".bold(),
            participants.join(", "),
            total_rounds
        ));
    }

    fn on_round_start(&self, round: u32, total_rounds: u32) {
        self.line(format!(
            "\n{} {}",
            "->".cyan(),
            format!("Round {}/{}", round, total_rounds).bold()
        ));
    }

    fn on_agent_start(&self, agent: &str, _stage: Stage) {
        self.line(format!("  {} thinking...", agent.cyan()));
    }

    fn on_agent_complete(&self, response: &ResponseUnit, _stage: Stage) {
        match response.error_detail() {
            Some(detail) => self.line(format!(
                "  {} {} (failed: {})",
                "x".red(),
                response.agent_name,
                detail
            )),
            None => self.line(format!("  {} {}", "v".green(), response.agent_name)),
        }
    }

    fn on_round_complete(&self, _round: u32) {}

    fn on_synthesis_start(&self, synthesizer: &str) {
        self.line(format!(
            "\n{} {} ({})",
            "->".magenta(),
            "Generating synthesis".bold(),
            synthesizer
        ));
    }

    fn on_synthesis_complete(&self, synthesis: &ResponseUnit) {
        if synthesis.is_error() {
            self.line(format!("  {} synthesis failed", "x".red()));
        }
        self.line("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Cloneable in-memory writer
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_simple_progress_writes_only_to_its_writer() {
        colored::control::set_override(false);
        let buffer = SharedBuffer::default();
        let progress = SimpleProgress::with_writer(buffer.clone());

        progress.on_debate_start("Tabs or spaces?", 1, &["A".to_string(), "B".to_string()]);
        progress.on_round_start(1, 1);
        progress.on_agent_start("A", Stage::Round(1));
        progress.on_agent_complete(&ResponseUnit::new("A", "m", "ok"), Stage::Round(1));
        progress.on_agent_complete(
            &ResponseUnit::failure("B", "m", "HTTP 503: busy"),
            Stage::Round(1),
        );
        progress.on_synthesis_start("A");
        progress.on_synthesis_complete(&ResponseUnit::new("A", "m", "article"));

        let text = buffer.contents();
        assert!(text.starts_with("Topic: Tabs or spaces?\nCouncil: A, B (1 rounds)\n"));
        assert!(text.contains("-> Round 1/1"));
        assert!(text.contains("  A thinking..."));
        assert!(text.contains("  v A\n"));
        assert!(text.contains("  x B (failed: HTTP 503: busy)"));
        assert!(text.contains("-> Generating synthesis (A)"));
    }
}
