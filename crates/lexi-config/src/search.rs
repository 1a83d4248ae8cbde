use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_debounce_ms() -> u64 {
    200
}

fn default_reveal_delay_ms() -> u64 {
    150
}

fn default_min_suggest_chars() -> usize {
    2
}

fn default_suggestion_limit() -> usize {
    10
}

fn default_suggestion_display_cap() -> usize {
    8
}

/// Timing and sizing of the live search surface
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a suggestion fetch is issued
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Delay between showing a result header and its meanings
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
    /// Trimmed query length (in chars) needed before suggesting
    #[serde(default = "default_min_suggest_chars")]
    pub min_suggest_chars: usize,
    /// `max` sent to the suggestion service
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    /// Suggestions actually shown
    #[serde(default = "default_suggestion_display_cap")]
    pub suggestion_display_cap: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            reveal_delay_ms: default_reveal_delay_ms(),
            min_suggest_chars: default_min_suggest_chars(),
            suggestion_limit: default_suggestion_limit(),
            suggestion_display_cap: default_suggestion_display_cap(),
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        let debounce_ms = env::var("LEXI_DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_debounce_ms);

        let reveal_delay_ms = env::var("LEXI_REVEAL_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_reveal_delay_ms);

        let suggestion_limit = env::var("LEXI_SUGGESTION_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_suggestion_limit);

        let suggestion_display_cap = env::var("LEXI_SUGGESTION_DISPLAY_CAP")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_suggestion_display_cap);

        Self {
            debounce_ms,
            reveal_delay_ms,
            min_suggest_chars: default_min_suggest_chars(),
            suggestion_limit,
            suggestion_display_cap,
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}
