//! Unified-diff patch sanitizing and file selection.

/// Line prefixes that carry diff metadata rather than code.
const HEADER_PREFIXES: [&str; 4] = ["---", "+++", "diff", "@@"];

/// Strips diff decoration from a unified-diff patch, keeping bare content lines.
///
/// Header lines are dropped, a single leading `+`/`-` marker is removed and
/// every surviving line is trimmed. Lines keep their original order.
pub fn clean(patch: &str) -> String {
    patch
        .lines()
        .filter(|line| !HEADER_PREFIXES.iter().any(|p| line.starts_with(p)))
        .map(|line| {
            line.strip_prefix('+')
                .or_else(|| line.strip_prefix('-'))
                .unwrap_or(line)
                .trim()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// File-extension allowlist deciding which changed files are reviewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionAllowlist {
    extensions: Vec<String>,
}

impl ExtensionAllowlist {
    /// Builds an allowlist; each entry is normalized to start with `.`.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().to_string())
            .filter(|e| !e.is_empty() && e != ".")
            .map(|e| if e.starts_with('.') { e } else { format!(".{e}") })
            .collect();
        Self { extensions }
    }

    /// Parses a comma separated list such as `".py, .pyi"`.
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// True when `filename` ends with one of the allowlisted extensions.
    pub fn matches(&self, filename: &str) -> bool {
        self.extensions.iter().any(|e| filename.ends_with(e.as_str()))
    }
}

impl Default for ExtensionAllowlist {
    fn default() -> Self {
        Self::new([".py"])
    }
}
