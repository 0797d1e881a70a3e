pub mod bundle;
pub mod config;
pub mod error;
pub mod gather;
pub mod rules;
pub mod size;

pub use bundle::{MergeReport, merge_project};
pub use config::MergeConfig;
pub use error::{AppError, Result};
pub use gather::{FileEntry, WalkedEntry, collect_files, gather_entries, render_tree};
pub use rules::IgnoreRules;
pub use size::format_size;
