use clap::{Parser, Subcommand, ValueEnum};
use pdf417_scan::detector::{
    Candidate, GradientMorphologyStrategy, ProjectionStrategy, RegionExtractionStrategy,
    select_candidates,
};
use pdf417_scan::pipeline::AttemptSource;
use pdf417_scan::tools::{
    bench_limit_from_env, dataset_iter, dataset_root_from_env, field_stats, inspect_stages,
    load_raster, mask_stats, scan_paths,
};
use pdf417_scan::{DecodeOutcome, RxingDecoder, ScanConfig, Scanner};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pdf417tool", version, about = "PDF417 photo scanning tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Gradient,
    Projection,
}

#[derive(Subcommand)]
enum Command {
    /// Decode the barcode in a single image
    Decode {
        #[arg(long)]
        image: PathBuf,
        #[arg(long, value_enum, default_value = "gradient")]
        strategy: StrategyArg,
        /// Ignore symbologies other than PDF417
        #[arg(long)]
        pdf417_only: bool,
    },
    /// Print stage statistics and candidate boxes for an image
    Inspect {
        #[arg(long)]
        image: PathBuf,
    },
    /// Decode every image under a directory and report the read rate
    Batch {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Decode {
            image,
            strategy,
            pdf417_only,
        } => decode_cmd(&image, strategy, pdf417_only),
        Command::Inspect { image } => inspect_cmd(&image),
        Command::Batch { root, limit } => batch_cmd(root, limit),
    }
}

fn scanner_for(config: ScanConfig, strategy: StrategyArg) -> Scanner<RxingDecoder> {
    let scanner = Scanner::with_config(RxingDecoder::new(config.hints), config);
    match strategy {
        StrategyArg::Gradient => scanner,
        StrategyArg::Projection => scanner.with_strategy(ProjectionStrategy::default()),
    }
}

fn decode_cmd(image: &Path, strategy: StrategyArg, pdf417_only: bool) -> ExitCode {
    let raster = match load_raster(image) {
        Ok(raster) => raster,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return ExitCode::from(2);
        }
    };

    let mut config = ScanConfig::global().clone();
    if pdf417_only {
        config = config.pdf417_only();
    }
    let scanner = scanner_for(config, strategy);

    let start = Instant::now();
    let report = scanner.scan(&raster);
    let elapsed = start.elapsed();

    println!("Image: {} ({}x{})", image.display(), raster.width(), raster.height());
    println!(
        "Attempts: {} decode, {} candidates, {:.1} ms",
        report.telemetry.decode_attempts,
        report.telemetry.candidates,
        elapsed.as_secs_f64() * 1000.0
    );
    match report.outcome {
        DecodeOutcome::Success(text) => {
            match report.telemetry.winner {
                Some(AttemptSource::Candidate { index, orientation }) => {
                    println!("Decoded from candidate {} ({})", index, orientation.label());
                }
                _ => println!("Decoded from whole image"),
            }
            println!("{}", text);
            ExitCode::SUCCESS
        }
        DecodeOutcome::NotFound => {
            println!("No barcode detected");
            ExitCode::from(1)
        }
    }
}

fn print_candidates(label: &str, candidates: &[Candidate<'_>]) {
    println!("{} candidates: {}", label, candidates.len());
    for (i, c) in candidates.iter().enumerate() {
        println!(
            "  Candidate {}: region=({}, {}, {}x{}) area={:.0} crop=({}, {}, {}x{}) aspect={:.2}",
            i,
            c.source_bbox.x,
            c.source_bbox.y,
            c.source_bbox.width,
            c.source_bbox.height,
            c.area,
            c.bbox.x,
            c.bbox.y,
            c.bbox.width,
            c.bbox.height,
            c.source_bbox.aspect_ratio().unwrap_or(0.0)
        );
    }
}

fn inspect_cmd(image: &Path) -> ExitCode {
    let raster = match load_raster(image) {
        Ok(raster) => raster,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return ExitCode::from(2);
        }
    };
    println!("Image: {} ({}x{})", image.display(), raster.width(), raster.height());

    let config = ScanConfig::global();
    let strategy = GradientMorphologyStrategy::from_config(config);
    let stages = inspect_stages(&raster, &strategy);

    let gradient = field_stats(&stages.gradient);
    println!(
        "Gradient range: {}-{}, average: {}",
        gradient.min, gradient.max, gradient.avg
    );
    for (label, mask) in [("Otsu mask", &stages.mask), ("Shaped mask", &stages.shaped)] {
        let stats = mask_stats(mask);
        println!(
            "{}: foreground={} total={} ratio={:.2}%",
            label,
            stats.foreground_pixels,
            stats.total_pixels,
            stats.foreground_ratio * 100.0
        );
    }
    println!("External regions: {}", stages.regions.len());

    let gray = raster.as_luma();
    let candidates = select_candidates(&stages.regions, &gray, &strategy.selection);
    print_candidates("Gradient", &candidates);
    print_candidates("Projection", &ProjectionStrategy::default().extract(&gray));
    ExitCode::SUCCESS
}

fn batch_cmd(root: Option<PathBuf>, limit: Option<usize>) -> ExitCode {
    let root = root.unwrap_or_else(dataset_root_from_env);
    let limit = limit.or_else(bench_limit_from_env);
    if !root.exists() {
        eprintln!("Dataset root not found: {}", root.display());
        return ExitCode::from(2);
    }

    let images: Vec<PathBuf> = dataset_iter(&root, limit).collect();
    if images.is_empty() {
        println!("No images found under {}", root.display());
        return ExitCode::SUCCESS;
    }

    let config = ScanConfig::global().clone();
    let scanner = Scanner::with_config(RxingDecoder::new(config.hints), config);

    let start = Instant::now();
    let results = scan_paths(&scanner, &images);
    let elapsed = start.elapsed();

    let mut decoded = 0usize;
    let mut failed_loads = 0usize;
    for (path, result) in &results {
        match result {
            Ok(DecodeOutcome::Success(text)) => {
                decoded += 1;
                println!("  OK   {} -> {}", path.display(), text);
            }
            Ok(DecodeOutcome::NotFound) => println!("  MISS {}", path.display()),
            Err(err) => {
                failed_loads += 1;
                println!("  ERR  {}: {}", path.display(), err);
            }
        }
    }

    let total = results.len();
    println!(
        "Read rate: {}/{} ({:.1}%), {} unreadable files, {:.1} ms/image",
        decoded,
        total,
        decoded as f64 * 100.0 / total as f64,
        failed_loads,
        elapsed.as_secs_f64() * 1000.0 / total as f64
    );
    ExitCode::SUCCESS
}
