//! Progress reporting for dialogue execution

use colloquy_application::ports::progress::DialogueProgressNotifier;
use colloquy_domain::{Stage, StageResponse};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during dialogue execution with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, _session: &str, stage: &Stage, participants: usize) {
        let pb = self.multi.add(ProgressBar::new(participants.max(1) as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(stage.display_name().to_string());
        pb.set_message("Starting...");

        *self.stage_bar.lock().unwrap() = Some(pb);
    }

    fn on_agent_response(&self, _session: &str, _stage: &Stage, response: &StageResponse) {
        if let Some(pb) = self.stage_bar.lock().unwrap().as_ref() {
            let status = if response.success {
                format!("{} {}", "v".green(), response.agent)
            } else {
                format!("{} {}", "x".red(), response.agent)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, _session: &str, stage: &Stage) {
        if let Some(pb) = self.stage_bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{} complete!", stage.display_name().green()));
        }
    }

    fn on_session_complete(&self, session: &str) {
        println!("{} session {} concluded", "*".green(), session);
    }

    fn on_session_error(&self, session: &str, error: &str) {
        if let Some(pb) = self.stage_bar.lock().unwrap().take() {
            pb.abandon();
        }
        eprintln!("{} session {} errored: {}", "!".red(), session, error);
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DialogueProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, _session: &str, stage: &Stage, participants: usize) {
        println!(
            "{} {} ({} participants)",
            "->".cyan(),
            stage.display_name().bold(),
            participants
        );
    }

    fn on_agent_response(&self, _session: &str, _stage: &Stage, response: &StageResponse) {
        if response.success {
            println!("  {} {}", "v".green(), response.agent);
        } else {
            println!("  {} {} (fallback)", "x".red(), response.agent);
        }
    }

    fn on_stage_complete(&self, _session: &str, _stage: &Stage) {
        println!();
    }

    fn on_session_complete(&self, session: &str) {
        println!("{} session {} concluded", "*".green(), session);
    }

    fn on_session_error(&self, session: &str, error: &str) {
        eprintln!("{} session {} errored: {}", "!".red(), session, error);
    }
}
