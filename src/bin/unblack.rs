use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use unblack::io::read_pbm;
use unblack::tools::{batch_clean, binary_stats, collect_inputs};
use unblack::{BitMatrix, CleanOptions, Cleaner, PbmFormat, Result, Threshold};

#[derive(Parser)]
#[command(name = "unblack", version, about = "Remove black edges from bitmaps")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clean one image; PBM on stdin/stdout when paths are omitted
    Clean {
        /// Input image (`-` or omitted for stdin)
        input: Option<PathBuf>,
        /// Output file (`-` or omitted for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write raw (P4) instead of plain (P1) PBM
        #[arg(long)]
        raw: bool,
        /// Fixed binarization threshold for non-PBM input
        #[arg(long)]
        threshold: Option<u8>,
    },
    /// Print black pixel counts before and after cleaning
    Stats {
        /// Input image (`-` or omitted for stdin)
        input: Option<PathBuf>,
        /// Fixed binarization threshold for non-PBM input
        #[arg(long)]
        threshold: Option<u8>,
    },
    /// Clean many images in parallel into a directory
    Batch {
        /// Image files or directories to search
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Directory receiving `<stem>.pbm` files (`<stem>-N.pbm` on clashes)
        #[arg(long)]
        out_dir: PathBuf,
        /// Write raw (P4) instead of plain (P1) PBM
        #[arg(long)]
        raw: bool,
        /// Fixed binarization threshold for non-PBM input
        #[arg(long)]
        threshold: Option<u8>,
        /// Worker threads (defaults to one per core)
        #[arg(long)]
        jobs: Option<usize>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Clean {
            input,
            output,
            raw,
            threshold,
        } => clean_cmd(input.as_deref(), output.as_deref(), raw, threshold),
        Command::Stats { input, threshold } => stats_cmd(input.as_deref(), threshold),
        Command::Batch {
            inputs,
            out_dir,
            raw,
            threshold,
            jobs,
        } => batch_cmd(&inputs, &out_dir, raw, threshold, jobs),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("unblack: {err}");
            ExitCode::FAILURE
        }
    }
}

/// `None` for stdin/stdout, given as `-` or omitted
fn file_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| p.as_os_str() != "-")
}

fn pbm_format(raw: bool) -> PbmFormat {
    if raw { PbmFormat::Raw } else { PbmFormat::Plain }
}

fn threshold_or_env(threshold: Option<u8>) -> Threshold {
    threshold.map_or_else(Threshold::from_env, Threshold::Fixed)
}

fn clean_options(raw: bool, threshold: Option<u8>) -> CleanOptions {
    CleanOptions {
        threshold: threshold_or_env(threshold),
        format: pbm_format(raw),
    }
}

fn load(cleaner: &Cleaner, input: Option<&Path>) -> Result<BitMatrix> {
    match file_path(input) {
        Some(path) => cleaner.load(path),
        None => {
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data)?;
            read_pbm(data.as_slice())
        }
    }
}

fn clean_cmd(
    input: Option<&Path>,
    output: Option<&Path>,
    raw: bool,
    threshold: Option<u8>,
) -> Result<ExitCode> {
    let mut cleaner = Cleaner::new(clean_options(raw, threshold));
    let mut matrix = load(&cleaner, input)?;
    let stats = cleaner.clean(&mut matrix);
    log::info!(
        "{}x{}: whitened {} pixels from {} border seeds",
        matrix.width(),
        matrix.height(),
        stats.whitened,
        stats.seeded
    );

    match file_path(output) {
        Some(path) => cleaner.save(&matrix, path)?,
        None => cleaner.write(&matrix, BufWriter::new(io::stdout().lock()))?,
    }
    Ok(ExitCode::SUCCESS)
}

fn stats_cmd(input: Option<&Path>, threshold: Option<u8>) -> Result<ExitCode> {
    let mut cleaner = Cleaner::new(clean_options(false, threshold));
    let mut matrix = load(&cleaner, input)?;
    let before = binary_stats(&matrix);

    let start = Instant::now();
    let fill = cleaner.clean(&mut matrix);
    let elapsed = start.elapsed();
    let after = binary_stats(&matrix);

    println!("Image: {}x{}", matrix.width(), matrix.height());
    println!(
        "Before: black_pixels={} total={} black_ratio={:.2}%",
        before.black_pixels,
        before.total_pixels,
        before.black_ratio * 100.0
    );
    println!(
        "After:  black_pixels={} total={} black_ratio={:.2}%",
        after.black_pixels,
        after.total_pixels,
        after.black_ratio * 100.0
    );
    println!(
        "Fill: seeded={} pushed={} whitened={} max_stack={} ({:.2?})",
        fill.seeded, fill.pushed, fill.whitened, fill.max_stack_depth, elapsed
    );
    Ok(ExitCode::SUCCESS)
}

fn batch_cmd(
    inputs: &[PathBuf],
    out_dir: &Path,
    raw: bool,
    threshold: Option<u8>,
    jobs: Option<usize>,
) -> Result<ExitCode> {
    if let Some(jobs) = jobs {
        if let Err(err) = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
        {
            log::warn!("keeping default thread pool: {err}");
        }
    }

    let images = collect_inputs(inputs);
    if images.is_empty() {
        println!("No images found");
        return Ok(ExitCode::SUCCESS);
    }
    fs::create_dir_all(out_dir)?;

    let start = Instant::now();
    let outcomes = batch_clean(&images, out_dir, clean_options(raw, threshold));
    let elapsed = start.elapsed();

    let mut failed = 0usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(stats) => println!(
                "{} -> {} (whitened {})",
                outcome.input.display(),
                outcome.output.display(),
                stats.whitened
            ),
            Err(err) => {
                failed += 1;
                println!("{} -> failed: {}", outcome.input.display(), err);
            }
        }
    }

    println!(
        "Cleaned {}/{} images in {:.2?}",
        outcomes.len() - failed,
        outcomes.len(),
        elapsed
    );
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
