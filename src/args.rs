use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "webvault")]
#[command(about = "Archives web pages as Markdown notes in a local vault")]
#[command(version)]
pub struct Args {
    /// Path to a file with one URL per line (blank lines and # comments skipped)
    #[arg(long)]
    pub urls_file: PathBuf,

    /// Directory where Markdown files and images are written
    #[arg(long)]
    pub output_dir: PathBuf,
}
