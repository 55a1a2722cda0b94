//! Progress notification port
//!
//! Defines the interface for reporting progress during a deliberation.

use council_domain::{AgentPersona, DeliberationPhase};

/// Callback for progress updates during a deliberation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &DeliberationPhase, total_steps: usize);

    /// Called when a persona finishes its turn; `success` is false when a
    /// fallback was substituted
    fn on_persona_complete(&self, phase: &DeliberationPhase, persona: &AgentPersona, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &DeliberationPhase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &DeliberationPhase, _total_steps: usize) {}
    fn on_persona_complete(
        &self,
        _phase: &DeliberationPhase,
        _persona: &AgentPersona,
        _success: bool,
    ) {
    }
    fn on_phase_complete(&self, _phase: &DeliberationPhase) {}
}
