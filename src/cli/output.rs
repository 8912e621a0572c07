//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::alerts::{SeverityRules, ThresholdDecision};
use crate::cli::args::OutputFormat;
use crate::pushover::{DeliveryOutcome, KeyRouter};
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Evaluation result for display
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub scaled: f64,
    pub decision: Option<ThresholdDecision>,
    pub skipped: Option<String>,
}

impl TableDisplay for CheckReport {
    fn to_table(&self) -> String {
        match (&self.decision, &self.skipped) {
            (Some(d), _) => {
                let mut output = format!("{} [{}]\n", d.title, d.level);
                output.push_str(&format!("  Event:  {}\n", d.event_name));
                output.push_str(&format!("  Sound:  {}\n", d.sound));
                output.push_str(&format!("  Expiry: {}\n", minutes(d.expiry_minutes)));
                output.push_str(&format!("  Retry:  {}", minutes(d.retry_minutes)));
                output
            }
            (None, Some(reason)) => format!("{}: no alert ({})", self.scaled, reason),
            (None, None) => format!("{}: no alert", self.scaled),
        }
    }

    fn to_compact(&self) -> String {
        match &self.decision {
            Some(d) => format!("{}:{}", d.level, d.title),
            None => format!("NONE:{}", self.scaled),
        }
    }
}

fn minutes(value: Option<u32>) -> String {
    value
        .map(|m| format!("{} min", m))
        .unwrap_or_else(|| "default".to_string())
}

/// Per-key delivery result for display
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryEntry {
    pub key: String,
    pub success: bool,
    pub request: Option<String>,
    pub receipt: Option<String>,
    pub error: Option<String>,
}

impl From<&DeliveryOutcome> for DeliveryEntry {
    fn from(outcome: &DeliveryOutcome) -> Self {
        match &outcome.result {
            Ok(sent) => Self {
                key: outcome.key.clone(),
                success: true,
                request: Some(sent.request.clone()),
                receipt: sent.receipt.as_ref().map(|r| r.to_string()),
                error: None,
            },
            Err(e) => Self {
                key: outcome.key.clone(),
                success: false,
                request: None,
                receipt: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Delivery results for display
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReport {
    pub no_key_defined: bool,
    pub deliveries: Vec<DeliveryEntry>,
}

impl TableDisplay for DeliveryReport {
    fn to_table(&self) -> String {
        if self.no_key_defined {
            return "✗ no-key-defined".to_string();
        }

        let mut output = String::new();
        for entry in &self.deliveries {
            match (&entry.error, &entry.receipt) {
                (Some(e), _) => output.push_str(&format!("✗ {}: {}\n", entry.key, e)),
                (None, Some(receipt)) => {
                    output.push_str(&format!("✓ {} (receipt {})\n", entry.key, receipt))
                }
                (None, None) => output.push_str(&format!("✓ {}\n", entry.key)),
            }
        }
        output.trim_end().to_string()
    }

    fn to_compact(&self) -> String {
        if self.no_key_defined {
            return "no-key-defined".to_string();
        }
        self.deliveries
            .iter()
            .map(|e| format!("{}:{}", e.key, if e.success { "ok" } else { "failed" }))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Severity rule row for display
#[derive(Debug, Clone, Serialize)]
pub struct RuleEntry {
    pub condition: String,
    pub level: String,
    pub title: String,
    pub sound: String,
    pub event: String,
    pub expiry_minutes: Option<u32>,
    pub retry_minutes: Option<u32>,
}

/// Severity table for display
#[derive(Debug, Clone, Serialize)]
pub struct RuleTable {
    pub rules: Vec<RuleEntry>,
}

impl From<&SeverityRules> for RuleTable {
    fn from(rules: &SeverityRules) -> Self {
        Self {
            rules: rules
                .rules()
                .iter()
                .map(|r| RuleEntry {
                    condition: r.condition.to_string(),
                    level: r.level.to_string(),
                    title: r.title.clone(),
                    sound: r.sound.clone(),
                    event: r.event_name.clone(),
                    expiry_minutes: r.expiry_minutes,
                    retry_minutes: r.retry_minutes,
                })
                .collect(),
        }
    }
}

impl TableDisplay for RuleTable {
    fn to_table(&self) -> String {
        let mut output = format!(
            "{:<3} {:<8} {:<8} {:<14} {:<11} {:<6} {:<8} {}\n",
            "#", "Value", "Level", "Title", "Sound", "Event", "Expiry", "Retry"
        );
        output.push_str(&format!("{:-<72}\n", ""));

        for (idx, rule) in self.rules.iter().enumerate() {
            output.push_str(&format!(
                "{:<3} {:<8} {:<8} {:<14} {:<11} {:<6} {:<8} {}\n",
                idx + 1,
                rule.condition,
                rule.level,
                rule.title,
                rule.sound,
                rule.event,
                minutes(rule.expiry_minutes),
                minutes(rule.retry_minutes),
            ));
        }

        output
    }

    fn to_compact(&self) -> String {
        self.rules
            .iter()
            .map(|r| format!("{}{}", r.level, r.condition.replace(' ', "")))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Resolved key sets for display
#[derive(Debug, Clone, Serialize)]
pub struct KeySets {
    pub user: Vec<String>,
    pub alarm: Vec<String>,
    pub announcement: Vec<String>,
}

impl From<&KeyRouter> for KeySets {
    fn from(router: &KeyRouter) -> Self {
        use crate::domain::Category;
        Self {
            user: router.keys_for(Category::User).to_vec(),
            alarm: router.keys_for(Category::Alarm).to_vec(),
            announcement: router.keys_for(Category::Announcement).to_vec(),
        }
    }
}

impl TableDisplay for KeySets {
    fn to_table(&self) -> String {
        fn row(name: &str, keys: &[String]) -> String {
            if keys.is_empty() {
                format!("{:<13} (none)", name)
            } else {
                format!("{:<13} {}", name, keys.join(" "))
            }
        }

        [
            row("user", &self.user),
            row("alarm", &self.alarm),
            row("announcement", &self.announcement),
        ]
        .join("\n")
    }

    fn to_compact(&self) -> String {
        format!(
            "user={} alarm={} announcement={}",
            self.user.len(),
            self.alarm.len(),
            self.announcement.len()
        )
    }
}

/// Generic message for display
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        if self.success {
            format!("✓ {}", self.message)
        } else {
            format!("✗ {}", self.message)
        }
    }
}
