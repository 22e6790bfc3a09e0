//! Alias table mapping one logical profile to several physical sections.

use std::collections::BTreeMap;

/// Alias duplicated into numbered sections by default.
pub const SANDBOX_ALIAS: &str = "sandbox";
const SANDBOX_TARGETS: &[&str] = &["sandbox", "sandbox2", "sandbox3"];

/// Serialization-time expansion of aliased profile names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanoutPolicy {
    aliases: BTreeMap<String, Vec<String>>,
}

impl FanoutPolicy {
    /// Policy with no aliases; every section is written under its own name.
    pub fn none() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    pub fn from_table(aliases: BTreeMap<String, Vec<String>>) -> Self {
        Self { aliases }
    }

    /// Section names `name` is written under, if it is an alias.
    pub fn expand(&self, name: &str) -> Option<&[String]> {
        self.aliases.get(name).map(Vec::as_slice)
    }

    /// Every alias that lists `name` as a target, other than `name` itself.
    pub fn aliases_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.aliases
            .iter()
            .filter(move |(alias, targets)| {
                alias.as_str() != name && targets.iter().any(|t| t == name)
            })
            .map(|(alias, _)| alias.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }
}

impl Default for FanoutPolicy {
    fn default() -> Self {
        let targets = SANDBOX_TARGETS.iter().map(|t| t.to_string()).collect();
        Self {
            aliases: BTreeMap::from([(SANDBOX_ALIAS.to_string(), targets)]),
        }
    }
}
