//! Output formatter trait

use orchestra_domain::{ConsensusResult, DebateResult, Response};
use serde::Serialize;
use std::collections::BTreeMap;

/// Renders orchestration results for the terminal
pub trait OutputFormatter {
    fn format_response(&self, response: &Response) -> String;

    fn format_consensus(&self, result: &ConsensusResult) -> String;

    fn format_debate(&self, result: &DebateResult) -> String;

    fn format_health(&self, report: &BTreeMap<String, bool>) -> String;

    fn format_providers(&self, providers: &[String], default_provider: Option<&str>) -> String;
}

/// Pretty-printed JSON of the result values
pub struct JsonFormatter;

impl JsonFormatter {
    fn render<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_response(&self, response: &Response) -> String {
        Self::render(response)
    }

    fn format_consensus(&self, result: &ConsensusResult) -> String {
        Self::render(result)
    }

    fn format_debate(&self, result: &DebateResult) -> String {
        Self::render(result)
    }

    fn format_health(&self, report: &BTreeMap<String, bool>) -> String {
        Self::render(report)
    }

    fn format_providers(&self, providers: &[String], default_provider: Option<&str>) -> String {
        Self::render(&serde_json::json!({
            "providers": providers,
            "default_provider": default_provider,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestra_domain::aggregate_responses;

    #[test]
    fn test_json_consensus_is_parseable() {
        let result = aggregate_responses(vec![
            Response::new("a", "Use Postgres"),
            Response::new("b", "Use Postgres"),
        ])
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_consensus(&result)).unwrap();
        assert_eq!(value["result"], "Use Postgres");
        assert_eq!(value["agreement"], 1.0);
    }

    #[test]
    fn test_json_health_keeps_name_order() {
        let report = BTreeMap::from([("b".to_string(), false), ("a".to_string(), true)]);
        let rendered = JsonFormatter.format_health(&report);
        assert!(rendered.find("\"a\"").unwrap() < rendered.find("\"b\"").unwrap());
    }
}
