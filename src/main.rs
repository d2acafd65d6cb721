use clap::Parser;
use webvault::Batch;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!(
        "Archiving URLs from {} into {}",
        args.urls_file.display(),
        args.output_dir.display()
    );

    // Run the batch; per-URL failures are logged and skipped, so the
    // process completes either way
    let batch = Batch::new(&args.output_dir);
    match batch.run_file(&args.urls_file).await {
        Ok(summary) => {
            println!(
                "Archived {} pages, {} failed",
                summary.archived, summary.failed
            );
        }
        Err(e) => {
            ::log::error!("Batch run failed: {}", e);
        }
    }
}
