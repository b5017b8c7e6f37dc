//! Progress reporting for consensus and debate runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use orchestra_application::EventListener;
use orchestra_domain::OrchestraEvent;
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with indicatif spinners and bars
///
/// Consensus shows a spinner while providers answer. A debate shows one bar
/// step per round, capped at the round budget.
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
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
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start(&self, bar: ProgressBar) {
        bar.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut slot) = self.bar.lock()
            && let Some(previous) = slot.replace(bar)
        {
            previous.finish_and_clear();
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(slot) = self.bar.lock()
            && let Some(bar) = slot.as_ref()
        {
            f(bar);
        }
    }

    fn finish(&self, message: String) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(bar) = slot.take()
        {
            bar.finish_with_message(message);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn selection(providers: &Option<Vec<String>>) -> String {
    match providers {
        Some(names) => names.join(", "),
        None => "all providers".to_string(),
    }
}

impl EventListener for ProgressReporter {
    fn on_event(&self, event: &OrchestraEvent) {
        match event {
            OrchestraEvent::ConsensusStart { providers, .. } => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(Self::spinner_style());
                bar.set_prefix("Consensus");
                bar.set_message(format!("asking {}...", selection(providers)));
                self.start(bar);
            }
            OrchestraEvent::ConsensusComplete { result } => {
                self.finish(format!(
                    "{} {:.0}% agreement",
                    "done,".green(),
                    result.agreement * 100.0
                ));
            }
            OrchestraEvent::DebateStart {
                providers,
                max_rounds,
                ..
            } => {
                let bar = ProgressBar::new(*max_rounds as u64);
                bar.set_style(Self::round_style());
                bar.set_prefix("Debate");
                bar.set_message(format!("round 1 with {}", selection(providers)));
                self.start(bar);
            }
            OrchestraEvent::DebateRound(round) => self.with_bar(|bar| {
                bar.inc(1);
                bar.set_message(format!(
                    "round {} agreement {:.0}%",
                    round.round,
                    round.agreement * 100.0
                ));
            }),
            OrchestraEvent::DebateComplete { result } => {
                let status = if result.converged {
                    "converged".green()
                } else {
                    "round budget spent".yellow()
                };
                self.finish(format!("{} after {} round(s)", status, result.round_count()));
            }
            _ => {}
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl EventListener for SimpleProgress {
    fn on_event(&self, event: &OrchestraEvent) {
        match event {
            OrchestraEvent::ConsensusStart { providers, .. } => {
                eprintln!("{} {} ({})", "->".cyan(), "Consensus".bold(), selection(providers));
            }
            OrchestraEvent::DebateStart {
                providers,
                threshold,
                max_rounds,
                ..
            } => {
                eprintln!(
                    "{} {} ({}, threshold {}, up to {} rounds)",
                    "->".cyan(),
                    "Debate".bold(),
                    selection(providers),
                    threshold,
                    max_rounds
                );
            }
            OrchestraEvent::DebateRound(round) => {
                eprintln!(
                    "  {} round {}: {:.0}% agreement",
                    "v".green(),
                    round.round,
                    round.agreement * 100.0
                );
            }
            OrchestraEvent::ConsensusComplete { .. } | OrchestraEvent::DebateComplete { .. } => {
                eprintln!();
            }
            _ => {}
        }
    }
}
