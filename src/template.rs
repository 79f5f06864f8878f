use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{(.*?)\}").expect("placeholder pattern is valid"));

/// A string template with `${key}` placeholders.
#[derive(Debug, Clone)]
pub struct KvTemplate {
    template: String,
}

impl KvTemplate {
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Replace every placeholder with its value from `values`.
    ///
    /// Keys without a value render as an empty string.
    pub fn render(&self, values: &HashMap<String, String>) -> String {
        PLACEHOLDER
            .replace_all(&self.template, |caps: &Captures| {
                values.get(&caps[1]).cloned().unwrap_or_default()
            })
            .into_owned()
    }
}
