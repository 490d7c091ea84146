//! Trigger-word controlled stripping of numeric tokens

use regex::Regex;

/// Drops year-like tokens (`1447`, `1447H`) from the whole input whenever
/// the trigger word appears anywhere in it.
pub struct NumericFilter {
    trigger: String,
    numeric_re: Regex,
}

impl NumericFilter {
    pub fn new(trigger: &str) -> Self {
        Self {
            trigger: trigger.trim().to_lowercase(),
            numeric_re: Regex::new(r"^[0-9]+[A-Za-z]*$").expect("numeric token pattern"),
        }
    }

    pub fn is_triggered(&self, text: &str) -> bool {
        !self.trigger.is_empty()
            && text
                .split_whitespace()
                .any(|token| token.to_lowercase() == self.trigger)
    }

    /// Returns the text with numeric tokens removed from every line, or the
    /// text unchanged when the trigger is absent. Line count is preserved.
    pub fn apply(&self, text: &str) -> String {
        if !self.is_triggered(text) {
            return text.to_string();
        }

        let filtered: Vec<String> = text
            .lines()
            .map(|line| {
                line.split_whitespace()
                    .filter(|token| {
                        let strip = self.numeric_re.is_match(token);
                        if strip {
                            tracing::debug!("Stripping numeric token '{}'", token);
                        }
                        !strip
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();

        filtered.join("\n")
    }
}
