//! Progress reporting for deliberation runs

use colored::Colorize;
use council_application::ports::progress::ProgressNotifier;
use council_domain::{AgentPersona, DeliberationPhase};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with one bar per phase
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn step_label(persona: &AgentPersona, success: bool) -> String {
        if success {
            format!("{} {}", "v".green(), persona.display_name)
        } else {
            format!("{} {} (fallback)", "x".red(), persona.display_name)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &DeliberationPhase, total_steps: usize) {
        let pb = self.multi.add(ProgressBar::new(total_steps as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(phase.display_name().to_string());
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_persona_complete(
        &self,
        _phase: &DeliberationPhase,
        persona: &AgentPersona,
        success: bool,
    ) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(Self::step_label(persona, success));
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &DeliberationPhase) {
        if let Some(pb) = self.phase_bar.lock().ok().and_then(|mut slot| slot.take()) {
            pb.finish_with_message(format!("{} complete!", phase.display_name().green()));
        }
    }
}

/// Plain line-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &DeliberationPhase, total_steps: usize) {
        eprintln!(
            "{} {} ({} steps)",
            "->".cyan(),
            phase.display_name().bold(),
            total_steps
        );
    }

    fn on_persona_complete(
        &self,
        _phase: &DeliberationPhase,
        persona: &AgentPersona,
        success: bool,
    ) {
        eprintln!("  {}", ProgressReporter::step_label(persona, success));
    }

    fn on_phase_complete(&self, _phase: &DeliberationPhase) {
        eprintln!();
    }
}
