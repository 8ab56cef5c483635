// Logging utilities
// Structured log lines (JSON + human-readable) and masking of free-text answers.

use log::Level;
use serde_json::json;

/// Mask a free-text answer before it reaches a log file.
/// Keeps the first and last three characters of long values.
pub fn mask_sensitive(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    if chars.len() <= 8 {
        return "***".to_string();
    }

    let visible = 3;
    let start: String = chars[..visible].iter().collect();
    let end: String = chars[chars.len() - visible..].iter().collect();
    format!("{}...{} ({} chars)", start, end, chars.len())
}

/// Parse phase and step from log message
/// Extracts [PHASE: ...] and [STEP: ...] tags and returns the remaining text
pub fn parse_log_metadata(message: &str) -> (Option<String>, Option<String>, String) {
    let (phase, rest) = take_tag(message, "[PHASE:");
    let (step, rest) = take_tag(&rest, "[STEP:");
    (phase, step, rest)
}

fn take_tag(message: &str, open: &str) -> (Option<String>, String) {
    let Some(start) = message.find(open) else {
        return (None, message.to_string());
    };
    let Some(len) = message[start..].find(']') else {
        return (None, message.to_string());
    };
    let value = message[start + open.len()..start + len].trim().to_string();
    let rest = format!("{} {}", &message[..start], &message[start + len + 1..])
        .trim()
        .to_string();
    (Some(value), rest)
}

/// One formatted log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub timestamp: &'a str,
    pub level: Level,
    pub target: &'a str,
    pub phase: Option<String>,
    pub step: Option<String>,
    pub message: String,
}

impl<'a> LogLine<'a> {
    /// Build a line from a raw message, lifting its phase/step tags.
    pub fn parse(timestamp: &'a str, level: Level, target: &'a str, raw: &str) -> Self {
        let (phase, step, message) = parse_log_metadata(raw);
        Self {
            timestamp,
            level,
            target,
            phase,
            step,
            message,
        }
    }

    pub fn to_json(&self) -> String {
        let mut entry = json!({
            "timestamp": self.timestamp,
            "level": self.level.as_str(),
            "target": self.target,
            "message": self.message,
        });
        if let Some(phase) = &self.phase {
            entry["phase"] = json!(phase);
        }
        if let Some(step) = &self.step {
            entry["step"] = json!(step);
        }
        serde_json::to_string(&entry).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn to_text(&self) -> String {
        let mut line = format!("[{}] [{}]", self.timestamp, self.level.as_str());
        if let Some(phase) = &self.phase {
            line.push_str(&format!(" [PHASE: {}]", phase));
        }
        if let Some(step) = &self.step {
            line.push_str(&format!(" [STEP: {}]", step));
        }
        line.push_str(&format!(" [{}] {}", self.target, self.message));
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_sensitive_short_values_fully_masked() {
        assert_eq!(mask_sensitive(""), "");
        assert_eq!(mask_sensitive("Acme"), "***");
        assert_eq!(mask_sensitive("12345678"), "***");
    }

    #[test]
    fn mask_sensitive_handles_accented_text() {
        // byte slicing would split 'é' here
        let masked = mask_sensitive("Société Générale");
        assert!(masked.starts_with("Soc..."), "{}", masked);
        assert!(masked.contains("ale"), "{}", masked);
        assert!(!masked.contains("Générale"), "{}", masked);
        assert!(masked.ends_with("(16 chars)"), "{}", masked);
    }

    #[test]
    fn parse_log_metadata_extracts_phase_and_step() {
        let (phase, step, msg) =
            parse_log_metadata("[PHASE: session] [STEP: mount] Session abc mounted");
        assert_eq!(phase.as_deref(), Some("session"));
        assert_eq!(step.as_deref(), Some("mount"));
        assert_eq!(msg, "Session abc mounted");
    }

    #[test]
    fn parse_log_metadata_without_tags_is_unchanged() {
        let (phase, step, msg) = parse_log_metadata("plain message");
        assert!(phase.is_none());
        assert!(step.is_none());
        assert_eq!(msg, "plain message");
    }

    #[test]
    fn parse_log_metadata_ignores_unterminated_tag() {
        let (phase, _, msg) = parse_log_metadata("[PHASE: tui broken");
        assert!(phase.is_none());
        assert_eq!(msg, "[PHASE: tui broken");
    }

    #[test]
    fn log_line_renders_json_and_text() {
        let line = LogLine::parse(
            "2026-01-01T00:00:00Z",
            Level::Info,
            "questionnaire_wizard::tui",
            "[PHASE: tui] [STEP: start] Starting",
        );

        let value: serde_json::Value = serde_json::from_str(&line.to_json()).expect("valid json");
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["phase"], "tui");
        assert_eq!(value["step"], "start");
        assert_eq!(value["message"], "Starting");

        assert_eq!(
            line.to_text(),
            concat!(
                "[2026-01-01T00:00:00Z] [INFO] [PHASE: tui] [STEP: start] ",
                "[questionnaire_wizard::tui] Starting"
            )
        );
    }
}
