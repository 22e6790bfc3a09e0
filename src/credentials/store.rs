//! Ordered in-memory model of the credentials file.

use std::collections::HashSet;

use super::FanoutPolicy;

/// How blank lines inside a section are treated while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlankLines {
    /// Discard blank lines. Rewrites are stable for every section.
    #[default]
    Drop,
    /// Keep blank lines as empty entries, including the separator written after
    /// each section. Untouched sections grow by one blank line per rewrite.
    Preserve,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    lines: Vec<String>,
}

/// Sections of a credentials file in file order, at most one per name.
///
/// `upsert` replaces an existing section's lines in place and appends new
/// names at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialsStore {
    sections: Vec<Section>,
}

impl CredentialsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse credentials file contents.
    ///
    /// A line starting with `[` opens a section named by the text between the
    /// first `[` and the last `]`. Body lines are stored trimmed. Lines before
    /// the first header are dropped, and a header without any stored body line
    /// produces no section. Repeated headers append to the earlier section.
    pub fn parse(contents: &str, blank_lines: BlankLines) -> Self {
        let mut store = Self::new();
        let mut current: Option<String> = None;

        for line in contents.lines() {
            if line.starts_with('[') {
                current = Some(section_name(line).to_string());
                continue;
            }
            let Some(name) = current.as_deref() else {
                continue;
            };
            let trimmed = line.trim();
            if trimmed.is_empty() && blank_lines == BlankLines::Drop {
                continue;
            }
            store.push_line(name, trimmed.to_string());
        }

        store
    }

    /// Lines stored for `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name)
            .map(|index| self.sections[index].lines.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Replace the lines of `name`, keeping its position, or append it.
    pub fn upsert(&mut self, name: &str, lines: Vec<String>) {
        match self.position(name) {
            Some(index) => self.sections[index].lines = lines,
            None => self.sections.push(Section {
                name: name.to_string(),
                lines,
            }),
        }
    }

    /// Section names in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Physical section names `render` writes, in order.
    pub fn physical_names<'a>(&'a self, fanout: &'a FanoutPolicy) -> Vec<&'a str> {
        self.physical_sections(fanout)
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    /// Serialize every section as `[name]`, its lines and a blank separator.
    ///
    /// Aliases in `fanout` are written once per target. A stored section that
    /// is a target of an alias present in the store is superseded by the
    /// expansion, and no physical name is written twice.
    pub fn render(&self, fanout: &FanoutPolicy) -> String {
        let mut out = String::new();
        for (name, lines) in self.physical_sections(fanout) {
            out.push('[');
            out.push_str(name);
            out.push_str("]\n");
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    fn physical_sections<'a>(&'a self, fanout: &'a FanoutPolicy) -> Vec<(&'a str, &'a [String])> {
        let mut emitted: HashSet<&str> = HashSet::new();
        let mut physical = Vec::new();

        for section in &self.sections {
            let lines = section.lines.as_slice();
            if let Some(targets) = fanout.expand(&section.name) {
                for target in targets {
                    if emitted.insert(target.as_str()) {
                        physical.push((target.as_str(), lines));
                    }
                }
                continue;
            }
            let superseded = fanout
                .aliases_of(&section.name)
                .any(|alias| self.contains(alias));
            if !superseded && emitted.insert(section.name.as_str()) {
                physical.push((section.name.as_str(), lines));
            }
        }

        physical
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|section| section.name == name)
    }

    fn push_line(&mut self, name: &str, line: String) {
        match self.position(name) {
            Some(index) => self.sections[index].lines.push(line),
            None => self.sections.push(Section {
                name: name.to_string(),
                lines: vec![line],
            }),
        }
    }
}

fn section_name(header: &str) -> &str {
    let inner = &header.trim()[1..];
    match inner.rfind(']') {
        Some(end) => &inner[..end],
        None => inner,
    }
}
