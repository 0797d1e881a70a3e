use crate::error::Result;
use crate::rules::IgnoreRules;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One path discovered by the traversal. The same entry list feeds both the
/// tree rendering and the file collection so they always agree on ordering.
#[derive(Debug, Clone)]
pub struct WalkedEntry {
    pub path: PathBuf,
    /// Root-relative path with separators normalized to `/`.
    pub relative_path: String,
    pub file_name: String,
    /// 1 for direct children of the scan root.
    pub depth: usize,
    pub is_dir: bool,
}

/// A collected leaf file. Content is read later, one file at a time.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub relative_path: String,
}

/// Walks the scan root depth-first with per-directory alphabetical ordering.
/// Ignored paths are pruned subtree-and-all, as is `skip_dir` (the output
/// directory, so reruns do not scan their own previous output). Symbolic
/// links are not traversed.
pub fn gather_entries(
    project_root: &Path,
    rules: &IgnoreRules,
    skip_dir: Option<&Path>,
) -> Result<Vec<WalkedEntry>> {
    log::debug!("Walking project directory: {}", project_root.display());

    let walker = WalkDir::new(project_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            if skip_dir.is_some_and(|skip| entry.path() == skip) {
                log::trace!("Skipping output directory: {}", entry.path().display());
                return false;
            }
            match pathdiff::diff_paths(entry.path(), project_root) {
                Some(relative) => !rules.is_ignored(&relative.to_string_lossy()),
                None => true,
            }
        });

    let mut entries = Vec::new();
    for entry_result in walker {
        let entry = entry_result?;
        if entry.depth() == 0 {
            continue;
        }
        let relative = pathdiff::diff_paths(entry.path(), project_root)
            .unwrap_or_else(|| entry.path().to_path_buf());
        let relative_path = relative.to_string_lossy().replace('\\', "/");
        log::trace!("Walked path: {}", relative_path);
        entries.push(WalkedEntry {
            path: entry.path().to_path_buf(),
            relative_path,
            file_name: entry.file_name().to_string_lossy().into_owned(),
            depth: entry.depth(),
            is_dir: entry.file_type().is_dir(),
        });
    }

    log::debug!("Directory walk complete. Found {} paths.", entries.len());
    Ok(entries)
}

/// Renders the walked entries as an indented tree: the root name on the
/// first line, then one line per entry with `│   ` per ancestor level and a
/// `├── ` branch marker. Directories carry a trailing `/`.
pub fn render_tree(project_root: &Path, entries: &[WalkedEntry]) -> String {
    let root_name = project_root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| project_root.display().to_string());

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(format!("{}/", root_name));

    for entry in entries {
        let mut line = "│   ".repeat(entry.depth - 1);
        line.push_str("├── ");
        line.push_str(&entry.file_name);
        if entry.is_dir {
            line.push('/');
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Filters the walked entries down to leaf files, preserving traversal order.
pub fn collect_files(entries: &[WalkedEntry]) -> Vec<FileEntry> {
    entries
        .iter()
        .filter(|entry| !entry.is_dir)
        .map(|entry| FileEntry {
            path: entry.path.clone(),
            relative_path: entry.relative_path.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn fixture() -> TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("alpha.txt"), "alpha").unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("src/util.rs"), "pub fn util() {}").unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::write(dir.path().join("node_modules/pkg/index.js"), "x").unwrap();
        fs::write(dir.path().join("zeta.txt"), "zeta").unwrap();
        dir
    }

    #[test]
    fn walk_is_sorted_and_prunes_ignored_subtrees() {
        let dir = fixture();
        let rules = IgnoreRules::from_lines(["node_modules/"]);

        let entries = gather_entries(dir.path(), &rules, None).unwrap();
        let relative: Vec<&str> = entries.iter().map(|e| e.relative_path.as_str()).collect();
        // The directory itself is not matched by the trailing-slash pattern,
        // only the paths inside it, so its own entry survives the walk.
        assert_eq!(
            relative,
            [
                "alpha.txt",
                "node_modules",
                "src",
                "src/main.rs",
                "src/util.rs",
                "zeta.txt"
            ]
        );
        assert!(relative.iter().all(|r| !r.starts_with("node_modules/")));
    }

    #[test]
    fn render_tree_matches_expected_layout() {
        let dir = fixture();
        let rules = IgnoreRules::from_lines(["node_modules/"]);
        let entries = gather_entries(dir.path(), &rules, None).unwrap();

        let root_name = dir.path().file_name().unwrap().to_string_lossy();
        let expected = format!(
            "{root_name}/\n\
             ├── alpha.txt\n\
             ├── node_modules/\n\
             ├── src/\n\
             │   ├── main.rs\n\
             │   ├── util.rs\n\
             ├── zeta.txt"
        );
        assert_eq!(render_tree(dir.path(), &entries), expected);
    }

    #[test]
    fn collect_files_keeps_traversal_order_and_drops_directories() {
        let dir = fixture();
        let rules = IgnoreRules::from_lines(["node_modules/"]);
        let entries = gather_entries(dir.path(), &rules, None).unwrap();

        let files = collect_files(&entries);
        let relative: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(
            relative,
            ["alpha.txt", "src/main.rs", "src/util.rs", "zeta.txt"]
        );
        assert!(files.iter().all(|f| f.path.is_file()));
    }

    #[test]
    fn skip_dir_is_excluded_with_its_contents() {
        let dir = fixture();
        let output = dir.path().join("merged_output");
        fs::create_dir(&output).unwrap();
        fs::write(output.join("part1.txt"), "old output").unwrap();

        let rules = IgnoreRules::from_lines([]);
        let entries = gather_entries(dir.path(), &rules, Some(&output)).unwrap();
        assert!(
            entries
                .iter()
                .all(|e| !e.relative_path.starts_with("merged_output"))
        );
    }

    #[test]
    fn repeated_walks_are_identical() {
        let dir = fixture();
        let rules = IgnoreRules::from_lines(["node_modules/"]);

        let first = gather_entries(dir.path(), &rules, None).unwrap();
        let second = gather_entries(dir.path(), &rules, None).unwrap();
        let first: Vec<_> = first.iter().map(|e| &e.relative_path).collect();
        let second: Vec<_> = second.iter().map(|e| &e.relative_path).collect();
        assert_eq!(first, second);
    }
}
