use crate::error::XlifferResult;
use regex::Regex;
use std::borrow::Cow;

/// Pattern + replacement applied to unit keys before they are matched or
/// written (`--key-match` / `--key-to`).
///
/// The replacement may use `$1`, `${name}` capture references.
#[derive(Debug, Clone, Default)]
pub struct KeyRewrite {
    rule: Option<(Regex, String)>,
}

impl KeyRewrite {
    /// Leaves every key unchanged
    pub fn identity() -> Self {
        Self { rule: None }
    }

    /// Compile a rewrite rule. An empty pattern means identity.
    pub fn new(pattern: &str, replacement: &str) -> XlifferResult<Self> {
        if pattern.is_empty() {
            return Ok(Self::identity());
        }
        let regex = Regex::new(pattern)?;
        Ok(Self {
            rule: Some((regex, replacement.to_string())),
        })
    }

    /// Build from optional CLI values; a missing replacement deletes matches
    pub fn from_options(pattern: Option<&str>, replacement: Option<&str>) -> XlifferResult<Self> {
        match pattern {
            Some(p) => Self::new(p, replacement.unwrap_or_default()),
            None => Ok(Self::identity()),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.rule.is_none()
    }

    pub fn apply<'a>(&self, key: &'a str) -> Cow<'a, str> {
        match &self.rule {
            Some((regex, replacement)) => regex.replace_all(key, replacement.as_str()),
            None => Cow::Borrowed(key),
        }
    }
}
