//! Declarative field validation.
//!
//! A `Schema` lists rules per field. Validation checks every field (it does
//! not stop at the first failing field) and keeps the first failing rule's
//! message for each field, so the form can show one inline error per input.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

/// Field name -> raw input value
pub type FormData = BTreeMap<String, String>;

/// Loose address check: something@something.tld, no whitespace
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Value must not be empty or whitespace
    Required(&'static str),
    /// Value must look like an e-mail address. Empty values pass.
    Email(&'static str),
    /// Value must have at least this many characters
    MinLength(usize, &'static str),
}

impl Rule {
    fn check(&self, value: &str) -> Option<&'static str> {
        match self {
            Rule::Required(msg) => value.trim().is_empty().then_some(*msg),
            Rule::Email(msg) => (!value.is_empty() && !is_valid_email(value)).then_some(*msg),
            Rule::MinLength(min, msg) => (value.chars().count() < *min).then_some(*msg),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(&'static str, Vec<Rule>)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, rules: Vec<Rule>) -> Self {
        self.fields.push((name, rules));
        self
    }

    /// Validate `data`. Missing fields are validated as empty strings.
    pub fn validate(&self, data: &FormData) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        for (name, rules) in &self.fields {
            let value = data.get(*name).map(String::as_str).unwrap_or("");
            if let Some(msg) = rules.iter().find_map(|rule| rule.check(value)) {
                errors.0.insert((*name).to_string(), msg.to_string());
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Per-field error messages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
