use clap::Parser;
use ghdir::{download, DownloadConfig, DownloadSummary, DEFAULT_API_BASE, DEFAULT_CONCURRENCY};
use indicatif::HumanBytes;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Number of files listed in the summary unless `--all-files` is given.
const PREVIEW_FILES: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "ghdir")]
#[command(about = "Download a folder (as a ZIP) or a single file from a GitHub URL", long_about = None)]
#[command(version)]
struct Args {
    /// GitHub folder or file URL, e.g. https://github.com/user/repo/tree/main/folder
    ///
    /// For private repositories embed a token: https://TOKEN@github.com/user/repo/tree/main/folder
    url: String,

    /// Directory the ZIP archive or file is written to
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Maximum number of files downloaded in parallel
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_CONCURRENCY as u16,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    concurrency: u16,

    /// Contents API base URL (GitHub Enterprise: https://HOST/api/v3)
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// List every downloaded file in the summary
    #[arg(long)]
    all_files: bool,

    /// Disable progress bars
    #[arg(long)]
    no_progress: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("ghdir={}", log_level))
        .with_writer(std::io::stderr)
        .init();

    info!("📦 ghdir - GitHub folder downloader");
    info!("Output directory: {:?}", args.output);

    let config = DownloadConfig {
        api_base: args.api_base,
        output_dir: args.output,
        max_concurrent_downloads: usize::from(args.concurrency),
        show_progress: !args.no_progress && !args.json && atty::is(atty::Stream::Stderr),
        ..DownloadConfig::default()
    };

    match download(&config, &args.url).await {
        Ok(summary) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_summary(&summary, args.all_files);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn print_summary(summary: &DownloadSummary, all_files: bool) {
    let elapsed = Duration::from_millis((summary.elapsed_secs * 1000.0).round() as u64);

    println!("✅ Download complete!");
    println!("   Files:  {}", summary.file_count);
    println!("   Size:   {}", HumanBytes(summary.total_size));
    println!("   Time:   {}", humantime::format_duration(elapsed));
    println!("   Saved:  {}", summary.output_path.display());

    let types = summary
        .file_types
        .iter()
        .map(|(ext, count)| format!("{} ({})", ext, count))
        .collect::<Vec<_>>()
        .join(", ");
    println!("   Types:  {}", types);

    let shown = if all_files {
        summary.files.len()
    } else {
        PREVIEW_FILES
    };
    println!();
    for file in summary.files.iter().take(shown) {
        println!("   {:<60} {:>10}", file.path, HumanBytes(file.size).to_string());
    }
    if summary.files.len() > shown {
        println!(
            "   ... and {} more (use --all-files to list them)",
            summary.files.len() - shown
        );
    }
}
