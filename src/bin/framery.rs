//! Command-line front end for the framery mockup pipeline.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use framery::pipeline::{self, RunOptions};
use framery::{DeviceKey, StorySettings, TrimOptions, catalog};

#[derive(Parser, Debug)]
#[command(name = "framery", version, about = "Wrap screenshots in device frame mockups")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a mockup for every screenshot in a folder.
    Run(RunArgs),
    /// List the available device profiles.
    Devices,
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Folder scanned for source screenshots.
    #[arg(long, default_value = "./screenshots")]
    input: PathBuf,

    /// Folder the rendered mockups are written into.
    #[arg(long, default_value = "./mockups")]
    output: PathBuf,

    /// Target device frame.
    #[arg(long, value_enum, default_value_t = DeviceChoice::Iphone14)]
    device: DeviceChoice,

    /// Disable whitespace trimming of the sources.
    #[arg(long)]
    no_trim: bool,

    /// Re-render outputs that already exist.
    #[arg(long)]
    overwrite: bool,

    /// Brightness at or above which a pixel counts as trim background.
    #[arg(long, default_value_t = 240)]
    trim_threshold: u8,

    /// Smallest fraction of each dimension a trim may keep.
    #[arg(long, default_value_t = 0.1)]
    trim_min_ratio: f64,

    /// JSON file with story overlay settings (instagram_story only).
    #[arg(long, value_name = "FILE")]
    overlay_settings: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DeviceChoice {
    Iphone14,
    InstagramStory,
    Macbook14,
    Macbook16,
    Imac24,
}

impl From<DeviceChoice> for DeviceKey {
    fn from(choice: DeviceChoice) -> Self {
        match choice {
            DeviceChoice::Iphone14 => DeviceKey::Iphone14,
            DeviceChoice::InstagramStory => DeviceKey::InstagramStory,
            DeviceChoice::Macbook14 => DeviceKey::Macbook14,
            DeviceChoice::Macbook16 => DeviceKey::Macbook16,
            DeviceChoice::Imac24 => DeviceKey::Imac24,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    match Cli::parse().command {
        Command::Devices => {
            for profile in catalog::profiles() {
                println!(
                    "{:16} {} ({}x{} screen, {}x{} frame)",
                    profile.key.to_string(),
                    profile.name,
                    profile.screen_width,
                    profile.screen_height,
                    profile.frame_width(),
                    profile.frame_height(),
                );
            }
            Ok(())
        }
        Command::Run(args) => run(args),
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let overlay_override = match &args.overlay_settings {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading overlay settings {}", path.display()))?;
            let settings: StorySettings = serde_json::from_str(&text)
                .with_context(|| format!("parsing overlay settings {}", path.display()))?;
            Some(settings)
        }
        None => None,
    };

    let opts = RunOptions {
        device: args.device.into(),
        auto_trim: !args.no_trim,
        skip_existing: !args.overwrite,
        trim: TrimOptions {
            threshold: args.trim_threshold,
            min_content_ratio: args.trim_min_ratio,
        },
        overlay_override,
    };

    let summary = pipeline::run(&args.input, &args.output, &opts)?;
    println!(
        "done: {} produced ({} trimmed), {} skipped, {} failed",
        summary.produced, summary.trimmed, summary.skipped, summary.failed
    );
    if summary.failed > 0 {
        anyhow::bail!("{} input(s) failed", summary.failed);
    }
    Ok(())
}
