use crate::error::{AppError, Result};
use byte_unit::Byte;
use std::convert::TryInto;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_OUTPUT_DIR: &str = "merged_output";
pub const DEFAULT_IGNORE_FILENAME: &str = ".mergeignore";
pub const DEFAULT_MAX_PART_SIZE: &str = "10MiB";

/// Fallback patterns used when the scan root has no ignore file.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".idea/",
    ".vscode/",
    "node_modules/",
    "*.exe",
    "*.iml",
    ".git/",
    ".DS_Store",
];

pub const SEPARATOR: &str = "=============================================";

#[derive(Debug, Clone, PartialEq)]
pub struct MergeConfig {
    /// Scan root. All relative paths in the output are computed against it.
    pub project_root: PathBuf,
    /// Output directory, resolved relative to the scan root.
    pub output_dir: PathBuf,
    /// Part size threshold, e.g. "10MiB". Parsed once at run start.
    pub max_part_size: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            project_root: PathBuf::from("."),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_part_size: DEFAULT_MAX_PART_SIZE.to_string(),
        }
    }
}

impl MergeConfig {
    pub fn determine_project_root(cli_path: Option<&PathBuf>) -> Result<PathBuf> {
        let root = match cli_path {
            Some(path) => {
                if !path.is_dir() {
                    return Err(AppError::Config(format!(
                        "Project root '{}' is not a directory",
                        path.display()
                    )));
                }
                // Canonicalize so the tree root line carries a real
                // directory name even when invoked with ".".
                path.canonicalize()?
            }
            None => env::current_dir()?,
        };
        log::debug!("Using project root: {}", root.display());
        Ok(root)
    }

    pub fn for_root(project_root: PathBuf) -> Self {
        MergeConfig {
            project_root,
            ..MergeConfig::default()
        }
    }

    /// Absolute location of the output directory.
    pub fn output_path(&self) -> PathBuf {
        if self.output_dir.is_absolute() {
            self.output_dir.clone()
        } else {
            self.project_root.join(&self.output_dir)
        }
    }

    pub fn max_part_size_bytes(&self) -> Result<usize> {
        let byte_value = Byte::from_str(&self.max_part_size).map_err(|e| {
            AppError::PartSize(format!(
                "Invalid part size format '{}': {}. Use KB, MB, etc.",
                self.max_part_size, e
            ))
        })?;
        let bytes: u128 = byte_value.into();
        let bytes: usize = bytes.try_into().map_err(|_| {
            AppError::PartSize("Part size exceeds maximum usize value on this platform.".to_string())
        })?;
        if bytes == 0 {
            return Err(AppError::PartSize(
                "Part size must be greater than 0 bytes".to_string(),
            ));
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_part_size_is_ten_mebibytes() {
        let config = MergeConfig::default();
        assert_eq!(config.max_part_size_bytes().unwrap(), 10 * 1024 * 1024);
    }

    #[test]
    fn rejects_unparseable_part_size() {
        let config = MergeConfig {
            max_part_size: "lots".to_string(),
            ..MergeConfig::default()
        };
        assert!(matches!(
            config.max_part_size_bytes(),
            Err(AppError::PartSize(_))
        ));
    }

    #[test]
    fn output_path_is_rooted_at_project() {
        let config = MergeConfig::for_root(PathBuf::from("/tmp/proj"));
        assert_eq!(config.output_path(), PathBuf::from("/tmp/proj/merged_output"));
    }
}
