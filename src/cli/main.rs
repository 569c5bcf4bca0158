//! Sprite preparation CLI tool
//!
//! Command-line interface for batch background removal, cropping, and sheet
//! splitting of scanned art assets.

use super::config::CliConfigBuilder;
use crate::{
    geometry::SplitLayout,
    processor::SpriteProcessor,
    services::{ImageIoService, OutputFormatHandler},
    tracing_config::{TracingConfig, TracingFormat},
    types::RemovalResult,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

/// Sprite preparation CLI tool
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "spriteprep")]
pub struct Cli {
    /// Input image files or directories
    #[arg(value_name = "INPUT", required = true)]
    pub input: Vec<String>,

    /// Output file (single input) or directory (batch processing)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = CliOutputFormat::Png)]
    pub format: CliOutputFormat,

    /// Near-white intensity threshold (all RGB channels must strictly exceed it)
    #[arg(short, long, default_value_t = 240)]
    pub threshold: u8,

    /// Clear every near-white pixel instead of only border-connected ones
    #[arg(long)]
    pub global: bool,

    /// Do not crop the result to its content
    #[arg(long)]
    pub no_crop: bool,

    /// Padding in pixels around the content when cropping
    #[arg(short, long, default_value_t = 10)]
    pub padding: u32,

    /// Center each sprite on a transparent canvas (e.g. 512x512)
    #[arg(long, value_name = "WxH")]
    pub canvas: Option<String>,

    /// Split each composite sheet into tiles before processing
    #[arg(long, value_enum)]
    pub split: Option<CliSplitLayout>,

    /// Margin in pixels trimmed on each side of the split lines
    #[arg(long, default_value_t = 80)]
    pub split_margin: u32,

    /// Vertical split position as a fraction of the height (implies --split vertical)
    #[arg(long, value_name = "RATIO")]
    pub split_ratio: Option<f32>,

    /// JPEG quality (0-100)
    #[arg(long, default_value_t = 90)]
    pub jpeg_quality: u8,

    /// Process directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Pattern for batch processing (e.g. "*.jpg")
    #[arg(long)]
    pub pattern: Option<String>,

    /// Enable verbose logging (-v: INFO, -vv: DEBUG, -vvv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliOutputFormat {
    Png,
    Jpeg,
    Tiff,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliSplitLayout {
    /// Four tiles: one per quadrant
    Grid2x2,
    /// Two tiles: top and bottom halves
    Vertical,
}

/// CLI entry point
///
/// # Errors
///
/// Returns an error for invalid arguments or unrecoverable I/O failures;
/// per-file processing failures are reported and skipped.
pub fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose).context("Failed to initialize tracing")?;

    CliConfigBuilder::validate_cli(&cli).context("Invalid CLI arguments")?;
    let (config, split) = CliConfigBuilder::from_cli(&cli).context("Failed to build configuration")?;

    info!("Starting sprite preparation");
    info!("Input(s): {}", cli.input.join(", "));
    info!(
        "Strategy: {}, threshold: {}, crop: {}",
        config.strategy, config.threshold, config.crop_to_content
    );
    if let Some(layout) = &split {
        info!("Splitting sheets into {} tiles", layout.tile_count());
    }

    let processor =
        SpriteProcessor::new(config).context("Failed to create sprite processor")?;

    let start_time = Instant::now();
    let processed_count = process_inputs(&cli, &processor, split.as_ref())?;

    let total_time = start_time.elapsed();
    info!(
        "Processed {} image(s) in {:.2}s",
        processed_count,
        total_time.as_secs_f64()
    );

    Ok(())
}

/// Initialize tracing based on verbosity level
fn init_tracing(verbose_count: u8) -> Result<()> {
    TracingConfig::new()
        .with_verbosity(verbose_count)
        .with_format(TracingFormat::Console)
        .init()
        .context("Failed to initialize tracing subscriber")
}

/// Process all inputs (files and directories)
fn process_inputs(
    cli: &Cli,
    processor: &SpriteProcessor,
    split: Option<&SplitLayout>,
) -> Result<usize> {
    // Collect all image files from inputs
    let mut all_files = Vec::new();

    for input in &cli.input {
        let path = PathBuf::from(input);

        if path.is_file() {
            if is_image_file(&path) {
                all_files.push(path);
            } else {
                warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            let dir_files = find_image_files(&path, cli.recursive, cli.pattern.as_deref())?;
            all_files.extend(dir_files);
        } else {
            anyhow::bail!(
                "Input path does not exist or is not accessible: {}",
                path.display()
            );
        }
    }

    if all_files.is_empty() {
        warn!("No supported image files found in the provided inputs");
        return Ok(0);
    }

    // Sort files alphanumerically for consistent processing order
    all_files.sort();

    info!("Found {} image file(s) to process", all_files.len());

    let file_count = all_files.len();
    let extension = OutputFormatHandler::extension(processor.config().output_format);

    // Validate and prepare the output target
    let output_dir = if file_count > 1 {
        if let Some(output) = &cli.output {
            let output_path = PathBuf::from(output);
            if !output_path.exists() {
                std::fs::create_dir_all(&output_path).with_context(|| {
                    format!(
                        "Failed to create output directory: {}",
                        output_path.display()
                    )
                })?;
            } else if output_path.is_file() {
                anyhow::bail!(
                    "Output path exists and is a file, not a directory: {}",
                    output_path.display()
                );
            }
            Some(output_path)
        } else {
            None
        }
    } else {
        None
    };

    let progress = if file_count > 1 {
        let pb = ProgressBar::new(file_count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut processed_count = 0;
    let mut failed_count = 0;

    for input_file in &all_files {
        if let Some(pb) = &progress {
            pb.set_message(format!("Processing {}", input_file.display()));
        }

        let output_base = if file_count == 1 {
            match &cli.output {
                Some(output) => PathBuf::from(output),
                None => default_output_path(input_file, extension),
            }
        } else {
            generate_output_path_with_dir(input_file, output_dir.as_deref(), extension)
        };

        match process_single_file(processor, split, input_file, &output_base, cli.jpeg_quality) {
            Ok(outputs) => {
                processed_count += 1;
                for output in outputs {
                    log::debug!("Saved: {}", output.display());
                }
            },
            Err(e) => {
                error!("Failed to process {}: {:#}", input_file.display(), e);
                failed_count += 1;
            },
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message(format!(
            "Completed! Processed: {processed_count}, Failed: {failed_count}"
        ));
    }

    if failed_count > 0 {
        warn!("Some files failed to process. Processed: {processed_count}, Failed: {failed_count}");
    }

    Ok(processed_count)
}

/// Process one input file, returning the written output paths
fn process_single_file(
    processor: &SpriteProcessor,
    split: Option<&SplitLayout>,
    input_file: &Path,
    output_base: &Path,
    jpeg_quality: u8,
) -> Result<Vec<PathBuf>> {
    let format = processor.config().output_format;

    match split {
        Some(layout) => {
            let image = ImageIoService::load_image(input_file)
                .with_context(|| format!("Failed to load {}", input_file.display()))?;
            let tiles = processor
                .process_sheet(&image, layout)
                .with_context(|| format!("Failed to process sheet {}", input_file.display()))?;

            let mut written = Vec::with_capacity(tiles.len());
            for (index, tile) in tiles.iter().enumerate() {
                let path = tile_output_path(output_base, index + 1);
                save_result(tile, &path, format, jpeg_quality)?;
                written.push(path);
            }
            Ok(written)
        },
        None => {
            let result = processor
                .process_file(input_file)
                .with_context(|| format!("Failed to process {}", input_file.display()))?;
            save_result(&result, output_base, format, jpeg_quality)?;
            Ok(vec![output_base.to_path_buf()])
        },
    }
}

/// Encode and write one processed result
fn save_result(
    result: &RemovalResult,
    path: &Path,
    format: crate::config::OutputFormat,
    jpeg_quality: u8,
) -> Result<()> {
    OutputFormatHandler::warn_if_opaque(format);

    let bytes = result
        .to_bytes(format, jpeg_quality)
        .with_context(|| format!("Failed to encode {}", path.display()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Whether a path points to a supported image file
fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Find all supported image files in a directory
fn find_image_files(
    dir: &Path,
    recursive: bool,
    pattern: Option<&str>,
) -> Result<Vec<PathBuf>> {
    let glob_pattern = pattern
        .map(glob::Pattern::new)
        .transpose()
        .context("Invalid file pattern")?;

    let walker = if recursive {
        walkdir::WalkDir::new(dir)
    } else {
        walkdir::WalkDir::new(dir).max_depth(1)
    };

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_image_file(path) {
            continue;
        }
        if let Some(pattern) = &glob_pattern {
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches {
                continue;
            }
        }
        files.push(path.to_path_buf());
    }
    Ok(files)
}

/// Default output path for a single input: same stem, output extension.
///
/// When that would overwrite the input (same format in place), a `_prepped`
/// suffix is appended instead.
fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    let candidate = input.with_extension(extension);
    if candidate == input {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        input.with_file_name(format!("{stem}_prepped.{extension}"))
    } else {
        candidate
    }
}

/// Output path for batch processing into an optional output directory
fn generate_output_path_with_dir(
    input: &Path,
    output_dir: Option<&Path>,
    extension: &str,
) -> PathBuf {
    match output_dir {
        Some(dir) => {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            dir.join(format!("{stem}.{extension}"))
        },
        None => default_output_path(input, extension),
    }
}

/// Output path for tile `n` of a split sheet: `{stem}-{n}.{ext}`
fn tile_output_path(output_base: &Path, index: usize) -> PathBuf {
    let stem = output_base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("tile");
    let extension = output_base
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");
    output_base.with_file_name(format!("{stem}-{index}.{extension}"))
}
