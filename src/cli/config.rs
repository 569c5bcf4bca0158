//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::{Cli, CliOutputFormat, CliSplitLayout};
use crate::{
    config::{OutputFormat, RemovalConfig, RemovalStrategy},
    geometry::SplitLayout,
};
use anyhow::{Context, Result};

/// Convert CLI arguments to library configuration
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Build the removal configuration and optional split layout from CLI
    /// arguments
    pub(crate) fn from_cli(cli: &Cli) -> Result<(RemovalConfig, Option<SplitLayout>)> {
        let output_format = match cli.format {
            CliOutputFormat::Png => OutputFormat::Png,
            CliOutputFormat::Jpeg => OutputFormat::Jpeg,
            CliOutputFormat::Tiff => OutputFormat::Tiff,
        };

        let strategy = if cli.global {
            RemovalStrategy::Global
        } else {
            RemovalStrategy::FloodFill
        };

        let mut builder = RemovalConfig::builder()
            .threshold(cli.threshold)
            .strategy(strategy)
            .crop_to_content(!cli.no_crop)
            .crop_padding(cli.padding)
            .output_format(output_format)
            .jpeg_quality(cli.jpeg_quality)
            .debug(cli.verbose >= 2);

        if let Some(canvas) = &cli.canvas {
            let (width, height) = Self::parse_canvas(canvas)?;
            builder = builder.canvas_size(width, height);
        }

        let config = builder.build().context("Invalid configuration")?;
        let split = Self::split_layout(cli).context("Invalid split options")?;

        Ok((config, split))
    }

    /// Resolve the requested split layout, if any.
    ///
    /// `--split-ratio` implies a vertical split at that ratio and is
    /// rejected together with `--split grid2x2`.
    fn split_layout(cli: &Cli) -> Result<Option<SplitLayout>> {
        let layout = match (cli.split, cli.split_ratio) {
            (Some(CliSplitLayout::Grid2x2), Some(_)) => {
                anyhow::bail!("--split-ratio cannot be combined with --split grid2x2")
            },
            (Some(CliSplitLayout::Grid2x2), None) => Some(SplitLayout::Grid2x2 {
                margin: cli.split_margin,
            }),
            (Some(CliSplitLayout::Vertical), Some(ratio)) | (None, Some(ratio)) => {
                Some(SplitLayout::VerticalRatio {
                    ratio,
                    margin: cli.split_margin,
                })
            },
            (Some(CliSplitLayout::Vertical), None) => Some(SplitLayout::Vertical {
                margin: cli.split_margin,
            }),
            (None, None) => None,
        };

        if let Some(layout) = &layout {
            layout.validate().context("Invalid split layout")?;
        }
        Ok(layout)
    }

    /// Parse a canvas specification of the form "WIDTHxHEIGHT"
    fn parse_canvas(spec: &str) -> Result<(u32, u32)> {
        let (w, h) = spec
            .split_once(['x', 'X'])
            .with_context(|| format!("Canvas must be WIDTHxHEIGHT, got '{spec}'"))?;
        let width: u32 = w
            .trim()
            .parse()
            .with_context(|| format!("Invalid canvas width '{w}'"))?;
        let height: u32 = h
            .trim()
            .parse()
            .with_context(|| format!("Invalid canvas height '{h}'"))?;
        Ok((width, height))
    }

    /// Validate CLI arguments for consistency
    pub(crate) fn validate_cli(cli: &Cli) -> Result<()> {
        if cli.jpeg_quality > 100 {
            anyhow::bail!("JPEG quality must be 0-100, got {}", cli.jpeg_quality);
        }
        if let Some(canvas) = &cli.canvas {
            Self::parse_canvas(canvas).context("Invalid canvas specification")?;
        }
        if let Some(ratio) = cli.split_ratio {
            if !(ratio > 0.0 && ratio < 1.0) {
                anyhow::bail!("Split ratio must be strictly between 0 and 1, got {ratio}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_cli() -> Cli {
        Cli {
            input: vec!["scan.jpg".to_string()],
            output: None,
            format: CliOutputFormat::Png,
            threshold: 240,
            global: false,
            no_crop: false,
            padding: 10,
            canvas: None,
            split: None,
            split_margin: 80,
            split_ratio: None,
            jpeg_quality: 90,
            recursive: false,
            pattern: None,
            verbose: 0,
        }
    }

    #[test]
    fn test_cli_config_conversion_defaults() {
        let cli = create_test_cli();
        let (config, split) = CliConfigBuilder::from_cli(&cli).unwrap();

        assert_eq!(config.threshold, 240);
        assert_eq!(config.strategy, RemovalStrategy::FloodFill);
        assert!(config.crop_to_content);
        assert_eq!(config.output_format, OutputFormat::Png);
        assert!(!config.debug);
        assert!(split.is_none());
    }

    #[test]
    fn test_cli_global_and_no_crop_flags() {
        let mut cli = create_test_cli();
        cli.global = true;
        cli.no_crop = true;

        let (config, _) = CliConfigBuilder::from_cli(&cli).unwrap();
        assert_eq!(config.strategy, RemovalStrategy::Global);
        assert!(!config.crop_to_content);
    }

    #[test]
    fn test_cli_canvas_parsing() {
        let mut cli = create_test_cli();
        cli.canvas = Some("512x256".to_string());

        let (config, _) = CliConfigBuilder::from_cli(&cli).unwrap();
        assert_eq!(config.canvas_size, Some((512, 256)));

        cli.canvas = Some("bogus".to_string());
        assert!(CliConfigBuilder::from_cli(&cli).is_err());
    }

    #[test]
    fn test_cli_split_layouts() {
        let mut cli = create_test_cli();
        cli.split = Some(CliSplitLayout::Grid2x2);
        let (_, split) = CliConfigBuilder::from_cli(&cli).unwrap();
        assert_eq!(split, Some(SplitLayout::Grid2x2 { margin: 80 }));

        cli.split = Some(CliSplitLayout::Vertical);
        cli.split_margin = 20;
        let (_, split) = CliConfigBuilder::from_cli(&cli).unwrap();
        assert_eq!(split, Some(SplitLayout::Vertical { margin: 20 }));

        cli.split = None;
        cli.split_ratio = Some(0.56);
        let (_, split) = CliConfigBuilder::from_cli(&cli).unwrap();
        assert_eq!(
            split,
            Some(SplitLayout::VerticalRatio {
                ratio: 0.56,
                margin: 20
            })
        );
    }

    #[test]
    fn test_cli_ratio_with_grid_rejected() {
        let mut cli = create_test_cli();
        cli.split = Some(CliSplitLayout::Grid2x2);
        cli.split_ratio = Some(0.5);
        assert!(CliConfigBuilder::from_cli(&cli).is_err());
    }

    #[test]
    fn test_cli_validation() {
        let mut cli = create_test_cli();
        assert!(CliConfigBuilder::validate_cli(&cli).is_ok());

        cli.jpeg_quality = 150;
        assert!(CliConfigBuilder::validate_cli(&cli).is_err());

        cli.jpeg_quality = 90;
        cli.split_ratio = Some(1.5);
        assert!(CliConfigBuilder::validate_cli(&cli).is_err());
    }
}
