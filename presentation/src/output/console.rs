//! Console output formatter for orchestration results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use orchestra_domain::{ConsensusResult, DebateResult, Response};
use std::collections::BTreeMap;

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format_response(response: &Response) -> String {
        let mut output = String::new();
        output.push_str(&response.content);
        output.push('\n');

        let mut details = vec![response.provider.clone()];
        if let Some(model) = &response.model {
            details.push(model.clone());
        }
        if let Some(usage) = &response.token_usage {
            details.push(format!("{} tokens", usage.total));
        }
        if let Some(latency) = response.latency_ms {
            details.push(format!("{}ms", latency));
        }
        output.push_str(&format!("\n{}\n", details.join(" · ").dimmed()));
        output
    }

    pub fn format_consensus(result: &ConsensusResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Consensus"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Providers:".cyan().bold(),
            result.providers.join(", ")
        ));
        output.push_str(&format!(
            "{} {}   {} {}\n",
            "Agreement:".cyan().bold(),
            Self::percent(result.agreement),
            "Confidence:".cyan().bold(),
            Self::percent(result.confidence)
        ));

        output.push_str(&Self::section_header("Answer"));
        output.push_str(&format!("\n{}\n", result.result));
        output.push_str(&format!("\n{}\n", result.reasoning.dimmed()));

        if let Some(dissenting) = result.dissenting.as_ref().filter(|d| !d.is_empty()) {
            output.push_str(&Self::section_header("Dissenting"));
            for response in dissenting {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", response.provider).yellow().bold(),
                    Self::indent(&response.content, "  ")
                ));
            }
        }

        output.push_str(&format!(
            "\n{}\n",
            format!(
                "{} round · {}ms · ${:.4}",
                result.metadata.rounds, result.metadata.total_time_ms, result.metadata.total_cost
            )
            .dimmed()
        ));
        output.push_str(&Self::footer());
        output
    }

    pub fn format_debate(result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Debate"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Participants:".cyan().bold(),
            result.participants.join(", ")
        ));

        for round in &result.rounds {
            output.push_str(&Self::section_header(&format!(
                "Round {} (agreement {})",
                round.round,
                Self::percent(round.agreement)
            )));
            for argument in &round.arguments {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", argument.provider).yellow().bold(),
                    Self::indent(&argument.content, "  ")
                ));
            }
        }

        output.push_str(&Self::section_header("Decision"));
        output.push_str(&format!("\n{}\n", result.decision));

        let outcome = if result.converged {
            format!("Converged after {} round(s)", result.round_count()).green()
        } else {
            format!(
                "No convergence after {} round(s), final agreement {}",
                result.round_count(),
                Self::percent(result.agreement)
            )
            .yellow()
        };
        output.push_str(&format!("\n{}\n", outcome));
        output.push_str(&Self::footer());
        output
    }

    pub fn format_health(report: &BTreeMap<String, bool>) -> String {
        if report.is_empty() {
            return format!("{}\n", "No providers registered".yellow());
        }
        report
            .iter()
            .map(|(name, healthy)| {
                let status = if *healthy {
                    "ok".green()
                } else {
                    "unreachable".red()
                };
                format!("{:<20} {}\n", name, status)
            })
            .collect()
    }

    pub fn format_providers(providers: &[String], default_provider: Option<&str>) -> String {
        if providers.is_empty() {
            return format!("{}\n", "No providers registered".yellow());
        }
        providers
            .iter()
            .map(|name| {
                if Some(name.as_str()) == default_provider {
                    format!("{} {}\n", name.bold(), "(default)".dimmed())
                } else {
                    format!("{}\n", name)
                }
            })
            .collect()
    }

    fn percent(value: f64) -> String {
        format!("{:.0}%", value * 100.0)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_response(&self, response: &Response) -> String {
        Self::format_response(response)
    }

    fn format_consensus(&self, result: &ConsensusResult) -> String {
        Self::format_consensus(result)
    }

    fn format_debate(&self, result: &DebateResult) -> String {
        Self::format_debate(result)
    }

    fn format_health(&self, report: &BTreeMap<String, bool>) -> String {
        Self::format_health(report)
    }

    fn format_providers(&self, providers: &[String], default_provider: Option<&str>) -> String {
        Self::format_providers(providers, default_provider)
    }
}
