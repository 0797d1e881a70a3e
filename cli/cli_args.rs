use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Merge a project tree into size-bounded text bundles.",
    long_about = "xmerge scans the project directory, skips paths matched by .mergeignore \n(or a built-in default list), and concatenates every remaining file into \nnumbered part files, each prefixed with a rendered directory tree."
)]
pub struct Cli {
    #[arg(
        long,
        help = "Specify the target project directory (default: current dir).",
        value_name = "PATH"
    )]
    pub project_root: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}
