use crate::config::{MergeConfig, SEPARATOR};
use crate::error::{AppError, Result};
use crate::gather::{self, FileEntry};
use crate::rules::IgnoreRules;
use crate::size::format_size;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a completed run, used for the CLI completion message.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    pub parts_written: usize,
    pub files_merged: usize,
    pub output_dir: PathBuf,
}

/// The single open output part. Blocks are joined with `\n` on flush; only
/// file blocks count toward the running size, the structure header does not.
#[derive(Debug)]
struct PartBuffer {
    number: usize,
    blocks: Vec<String>,
    size: usize,
}

impl PartBuffer {
    /// Number of blocks in the structure header every part opens with.
    const HEADER_BLOCKS: usize = 6;

    fn new(number: usize, tree: &str) -> Self {
        let blocks = vec![
            SEPARATOR.to_string(),
            format!("=== Part {} ===", number),
            SEPARATOR.to_string(),
            "PROJECT STRUCTURE:".to_string(),
            tree.to_string(),
            SEPARATOR.to_string(),
        ];
        debug_assert_eq!(blocks.len(), Self::HEADER_BLOCKS);
        PartBuffer {
            number,
            blocks,
            size: 0,
        }
    }

    fn would_overflow(&self, block_len: usize, max_part_size: usize) -> bool {
        self.size + block_len > max_part_size
    }

    fn push_block(&mut self, block: String) {
        self.size += block.len();
        self.blocks.push(block);
    }

    fn write_to(&self, output_dir: &Path) -> Result<()> {
        let path = output_dir.join(format!("part{}.txt", self.number));
        fs::write(&path, self.blocks.join("\n")).map_err(|e| AppError::FileWrite {
            path: path.clone(),
            source: e,
        })?;
        log::info!(
            "Wrote {} ({} file blocks, {})",
            path.display(),
            self.blocks.len().saturating_sub(Self::HEADER_BLOCKS),
            format_size(self.size as u64)
        );
        Ok(())
    }
}

/// Reads one source file and renders its labeled block. Unreadable and
/// non-UTF-8 files abort the whole run; parts flushed so far stay on disk.
fn build_file_block(file: &FileEntry) -> Result<String> {
    let bytes = fs::read(&file.path).map_err(|e| AppError::FileRead {
        path: file.path.clone(),
        source: e,
    })?;
    let byte_size = bytes.len() as u64;
    let content = String::from_utf8(bytes).map_err(|_| AppError::NonUtf8 {
        path: file.path.clone(),
    })?;

    Ok(format!(
        "{sep}\nPATH: {path}\nSIZE: {size}\n{sep}\n{content}\n\n",
        sep = SEPARATOR,
        path = file.relative_path,
        size = format_size(byte_size),
    ))
}

/// Runs the whole scan-and-merge pipeline: load ignore rules, walk the tree
/// once, then append one block per file to the open part, rolling over to a
/// new numbered part whenever the size threshold would be exceeded.
///
/// The threshold is checked before appending, never retroactively, so a
/// single oversized block always lands unsplit at the start of a fresh part
/// and may alone exceed the cap. The final part is always written, even when
/// it holds nothing beyond the structure header.
pub fn merge_project(config: &MergeConfig) -> Result<MergeReport> {
    let max_part_size = config.max_part_size_bytes()?;
    let output_dir = config.output_path();
    fs::create_dir_all(&output_dir).map_err(|e| AppError::DirCreation {
        path: output_dir.clone(),
        source: e,
    })?;

    let rules = IgnoreRules::load(&config.project_root);
    let entries = gather::gather_entries(&config.project_root, &rules, Some(&output_dir))?;
    let tree = gather::render_tree(&config.project_root, &entries);
    let files = gather::collect_files(&entries);
    log::info!(
        "Collected {} files under {}",
        files.len(),
        config.project_root.display()
    );

    let mut part = PartBuffer::new(1, &tree);

    for file in &files {
        let block = build_file_block(file)?;
        if part.would_overflow(block.len(), max_part_size) {
            part.write_to(&output_dir)?;
            part = PartBuffer::new(part.number + 1, &tree);
        }
        part.push_block(block);
    }

    part.write_to(&output_dir)?;
    let parts_written = part.number;

    Ok(MergeReport {
        parts_written,
        files_merged: files.len(),
        output_dir,
    })
}
