use crate::config::{DEFAULT_IGNORE_FILENAME, DEFAULT_IGNORE_PATTERNS};
use std::fs;
use std::path::Path;

/// Ordered exclusion patterns, loaded once at run start.
///
/// Three pattern shapes are recognized:
/// - trailing `/` excludes a directory (and its subtree) at any depth,
/// - leading `*.` excludes by file extension,
/// - anything else excludes an exact path or a same-named entry at any depth.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    patterns: Vec<String>,
}

impl IgnoreRules {
    /// Reads the ignore file at the scan root, falling back to the built-in
    /// defaults when the file is absent or unreadable. Never fails.
    pub fn load(project_root: &Path) -> Self {
        let ignore_path = project_root.join(DEFAULT_IGNORE_FILENAME);
        match fs::read_to_string(&ignore_path) {
            Ok(contents) => {
                log::debug!("Loaded ignore patterns from {}", ignore_path.display());
                Self::from_lines(contents.lines())
            }
            Err(_) => {
                log::debug!(
                    "No readable {} at scan root, using built-in defaults",
                    DEFAULT_IGNORE_FILENAME
                );
                IgnoreRules {
                    patterns: DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect(),
                }
            }
        }
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let patterns = lines
            .into_iter()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect();
        IgnoreRules { patterns }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether a root-relative path matches any pattern. Separators are
    /// normalized to `/` before matching so Windows paths behave the same.
    pub fn is_ignored(&self, relative_path: &str) -> bool {
        let path = relative_path.replace('\\', "/");

        self.patterns.iter().any(|pattern| {
            // Blank and comment lines are filtered at load time, but a
            // hand-built rule set may still contain them.
            let pattern = pattern.trim();
            if pattern.is_empty() || pattern.starts_with('#') {
                return false;
            }

            if pattern.ends_with('/') {
                return path.starts_with(pattern) || path.contains(&format!("/{}", pattern));
            }

            if let Some(ext) = pattern.strip_prefix('*') {
                if ext.starts_with('.') {
                    return path.ends_with(ext);
                }
            }

            path == pattern || path.contains(&format!("/{}", pattern))
        })
    }
}
