//! Keyword-to-response matching
//!
//! An ordered table of `(triggers, response)` rules. Input is lower-cased and
//! the first rule with any trigger contained in it wins. The last rule has no
//! triggers and matches everything, so every input gets an answer.

mod rules;

#[cfg(test)]
mod proptests;

pub use rules::WELCOME_MESSAGE;

use serde::Deserialize;
use thiserror::Error;

/// One `(triggers, response)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Lower-cased trigger substrings; empty for the fallback
    triggers: Vec<String>,
    response: String,
}

impl Rule {
    pub fn new<I, T>(triggers: I, response: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            triggers: triggers
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
            response: response.into(),
        }
    }

    /// A rule with no triggers, matching unconditionally
    pub fn fallback(response: impl Into<String>) -> Self {
        Self {
            triggers: Vec::new(),
            response: response.into(),
        }
    }

    #[cfg(test)]
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn is_fallback(&self) -> bool {
        self.triggers.is_empty()
    }

    /// `folded` must already be lower-cased
    fn matches(&self, folded: &str) -> bool {
        self.is_fallback() || self.triggers.iter().any(|t| folded.contains(t.as_str()))
    }
}

/// Reasons a rule table is rejected at load time
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleTableError {
    #[error("rule table is empty")]
    Empty,
    #[error("last rule must be a fallback with no triggers")]
    MissingFallback,
    #[error("rule {index} has no triggers but is not the last rule")]
    MisplacedFallback { index: usize },
    #[error("rule {index} has an empty trigger, which would match every input")]
    EmptyTrigger { index: usize },
    #[error("invalid rule file: {0}")]
    Parse(String),
}

/// Ordered, immutable rule table ending in exactly one fallback
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Validate and build a table
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleTableError> {
        let Some(last) = rules.last() else {
            return Err(RuleTableError::Empty);
        };
        if !last.is_fallback() {
            return Err(RuleTableError::MissingFallback);
        }

        let last_index = rules.len() - 1;
        for (index, rule) in rules.iter().enumerate() {
            if index != last_index && rule.is_fallback() {
                return Err(RuleTableError::MisplacedFallback { index });
            }
            if rule.triggers.iter().any(String::is_empty) {
                return Err(RuleTableError::EmptyTrigger { index });
            }
        }

        Ok(Self { rules })
    }

    /// The researcher homepage table
    pub fn builtin() -> Self {
        let mut table: Vec<Rule> = rules::BUILTIN_RULES
            .iter()
            .map(|def| Rule::new(def.triggers, def.response))
            .collect();
        table.push(Rule::fallback(rules::FALLBACK_RESPONSE));
        Self { rules: table }
    }

    /// Index of the first rule matching `input`
    pub fn match_index(&self, input: &str) -> usize {
        let folded = input.to_lowercase();
        self.rules
            .iter()
            .position(|rule| rule.matches(&folded))
            .unwrap_or(self.rules.len() - 1)
    }

    /// Response text of the first rule matching `input`
    pub fn respond(&self, input: &str) -> &str {
        self.rules[self.match_index(input)].response()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[cfg(test)]
    pub fn fallback(&self) -> &Rule {
        &self.rules[self.rules.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

/// Everything the bot says: the greeting plus the rule table
#[derive(Debug, Clone)]
pub struct Script {
    pub welcome: String,
    pub rules: RuleTable,
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default)]
    welcome: Option<String>,
    rules: Vec<RuleFile>,
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    triggers: Vec<String>,
    response: String,
}

impl Script {
    pub fn builtin() -> Self {
        Self {
            welcome: WELCOME_MESSAGE.to_string(),
            rules: RuleTable::builtin(),
        }
    }

    /// Parse a JSON script file
    ///
    /// ```json
    /// { "welcome": "Hi!", "rules": [
    ///     { "triggers": ["contact"], "response": "Email me." },
    ///     { "response": "Ask me something else." }
    /// ] }
    /// ```
    ///
    /// The built-in greeting is used when `welcome` is omitted.
    pub fn from_json(json: &str) -> Result<Self, RuleTableError> {
        let file: ScriptFile =
            serde_json::from_str(json).map_err(|e| RuleTableError::Parse(e.to_string()))?;

        let rules = file
            .rules
            .into_iter()
            .map(|r| Rule::new(r.triggers, r.response))
            .collect();

        Ok(Self {
            welcome: file.welcome.unwrap_or_else(|| WELCOME_MESSAGE.to_string()),
            rules: RuleTable::new(rules)?,
        })
    }
}
