//! cssfx CLI
//!
//! Create, inspect and edit keyframed CSS filter animations stored as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cssfx_animation::{
    Animation, InlineStyle, KeyframeToggle, TimelineModel, NO_ANIMATION_TEXT, NO_FILTERS_TEXT,
};
use cssfx_core::{CodeStyle, Color, FilterKind, FilterList, HighlightedCss, ParamValue, PlainCss};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod store;

use config::CssfxConfig;
use store::JsonFileStore;

#[derive(Parser)]
#[command(name = "cssfx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Keyframed CSS filter animation editor", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./cssfx.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new animation file
    New {
        /// Animation file
        file: PathBuf,

        /// Filter to add (blur, sepia, drop-shadow, ...); may be repeated
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show filters, keyframes and duration
    Info {
        /// Animation file
        file: PathBuf,
    },

    /// Print the filter value at a time
    Render {
        /// Animation file
        file: PathBuf,

        /// Time to render
        #[arg(short, long)]
        time: f32,

        /// Print highlighted HTML instead of plain CSS
        #[arg(long)]
        highlight: bool,
    },

    /// Print the @keyframes listing
    Code {
        /// Animation file
        file: PathBuf,
    },

    /// Add a keyframe at a time, or remove the one already there
    Toggle {
        /// Animation file
        file: PathBuf,

        /// Keyframe time
        #[arg(short, long)]
        time: f32,
    },

    /// Set a filter parameter at a time, creating a keyframe if needed
    Set {
        /// Animation file
        file: PathBuf,

        /// Keyframe time
        #[arg(short, long)]
        time: f32,

        /// Filter name
        #[arg(short, long)]
        filter: String,

        /// Parameter name
        #[arg(short, long)]
        param: String,

        /// Number, or a color such as #ff000080
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = CssfxConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::New {
            file,
            filters,
            force,
        } => cmd_new(&config, &file, &filters, force),

        Commands::Info { file } => cmd_info(&config, &file),

        Commands::Render {
            file,
            time,
            highlight,
        } => cmd_render(&config, &file, time, highlight),

        Commands::Code { file } => cmd_code(&config, &file),

        Commands::Toggle { file, time } => cmd_toggle(&config, &file, time),

        Commands::Set {
            file,
            time,
            filter,
            param,
            value,
        } => cmd_set(&config, &file, time, &filter, &param, &value),

        Commands::Config => cmd_config(&config),
    }
}

/// Load an animation file, wired to a timeline and a store writing back to it
fn open_animation(config: &CssfxConfig, path: &Path) -> Result<Animation> {
    let store = JsonFileStore::new(path);
    let snapshot = store.read()?;

    let mut animation = Animation::with_config(
        FilterList::new(),
        InlineStyle::new(),
        config.animation.clone(),
    );
    animation.attach_timeline(TimelineModel::new(snapshot.duration));
    animation
        .load_animation(&snapshot)
        .with_context(|| format!("Invalid animation in {}", path.display()))?;
    animation.attach_store(store);

    debug!(
        "Opened {} ({} keyframes)",
        path.display(),
        animation.keyframe_count()
    );
    Ok(animation)
}

fn code_style(config: &CssfxConfig, highlight: bool) -> Box<dyn CodeStyle> {
    if highlight || config.output.highlight {
        Box::new(HighlightedCss)
    } else {
        Box::new(PlainCss)
    }
}

fn check_time(time: f32) -> Result<()> {
    if !time.is_finite() || time < 0.0 {
        anyhow::bail!("Invalid time {}: expected a finite, non-negative number", time);
    }
    Ok(())
}

/// Parse a parameter value: a number, or a hex color
fn parse_value(text: &str) -> Result<ParamValue> {
    if let Ok(number) = text.parse::<f32>() {
        return Ok(ParamValue::Number(number));
    }
    Color::parse_hex(text)
        .map(ParamValue::Color)
        .with_context(|| format!("Invalid value '{}': expected a number or #rrggbb[aa]", text))
}

fn cmd_new(config: &CssfxConfig, path: &Path, filters: &[String], force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    let kinds = filters
        .iter()
        .map(|name| FilterKind::from_type_name(name))
        .collect::<Result<Vec<_>, _>>()?;

    let animation = Animation::with_config(
        FilterList::with_kinds(kinds),
        InlineStyle::new(),
        config.animation.clone(),
    );
    let snapshot = animation.dump_animation();
    JsonFileStore::new(path).write(&snapshot)?;

    info!(
        "Created {} with {} filters",
        path.display(),
        snapshot.filters.len()
    );
    Ok(())
}

fn cmd_info(config: &CssfxConfig, path: &Path) -> Result<()> {
    let animation = open_animation(config, path)?;
    let snapshot = animation.dump_animation();

    println!("{}", path.display());
    println!("  Duration:  {}", snapshot.duration);
    println!("  Filters:");
    if snapshot.filters.is_empty() {
        println!("    (none)");
    }
    for filter in animation.filter_list().filters() {
        println!(
            "    {} ({}){}",
            filter.name,
            filter.kind,
            if filter.active { "" } else { " [inactive]" }
        );
    }

    println!("  Keyframes:");
    if animation.keyframe_count() == 0 {
        println!("    (none)");
    }
    for (_, keyframe) in animation.keyframes() {
        println!(
            "    {:>8}  {}",
            keyframe.time,
            animation.filters_for_keyframe(keyframe, &PlainCss).join(" ")
        );
    }

    Ok(())
}

fn cmd_render(config: &CssfxConfig, path: &Path, time: f32, highlight: bool) -> Result<()> {
    check_time(time)?;
    let animation = open_animation(config, path)?;

    let style = code_style(config, highlight);
    let filters = animation.filters_at_time(time, style.as_ref());
    if filters.is_empty() {
        println!("{}", NO_FILTERS_TEXT);
    } else if highlight || config.output.highlight {
        println!("{}", filters.join("<br />"));
    } else {
        println!("{}", filters.join(" "));
    }
    Ok(())
}

fn cmd_code(config: &CssfxConfig, path: &Path) -> Result<()> {
    let animation = open_animation(config, path)?;

    let style = code_style(config, false);
    let stops = animation.compute_animation_code(style.as_ref());
    if stops.is_empty() {
        println!("{}", NO_ANIMATION_TEXT);
    } else {
        print!("{}", stops.concat());
    }
    Ok(())
}

fn cmd_toggle(config: &CssfxConfig, path: &Path, time: f32) -> Result<()> {
    check_time(time)?;
    let mut animation = open_animation(config, path)?;
    animation.set_current_time(time);

    match animation.toggle_keyframe()? {
        KeyframeToggle::Created(_) => info!("Added keyframe at {}", time),
        KeyframeToggle::Removed(keyframe) => info!("Removed keyframe at {}", keyframe.time),
    }
    animation.flush_saves();
    Ok(())
}

fn cmd_set(
    config: &CssfxConfig,
    path: &Path,
    time: f32,
    filter: &str,
    param: &str,
    value: &str,
) -> Result<()> {
    check_time(time)?;
    let value = parse_value(value)?;
    let mut animation = open_animation(config, path)?;
    animation.set_current_time(time);

    animation.set_param(filter, param, value)?;
    info!(
        "Set {}.{} at {}: {}",
        filter,
        param,
        time,
        animation.filter_css()
    );
    animation.flush_saves();
    Ok(())
}

fn cmd_config(config: &CssfxConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cssfx_animation::AnimationSnapshot;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("12.5").unwrap(), ParamValue::Number(12.5));
        assert_eq!(parse_value("-4").unwrap(), ParamValue::Number(-4.0));
        assert_eq!(
            parse_value("#ff0000").unwrap(),
            ParamValue::Color(Color::rgb(1.0, 0.0, 0.0))
        );
        assert!(parse_value("red").is_err());
    }

    #[test]
    fn test_check_time() {
        assert!(check_time(0.0).is_ok());
        assert!(check_time(-1.0).is_err());
        assert!(check_time(f32::INFINITY).is_err());
    }

    #[test]
    fn test_edit_persists_to_file() {
        let path = std::env::temp_dir().join(format!("cssfx-{}-edit.json", std::process::id()));
        let config = CssfxConfig::default();

        cmd_new(&config, &path, &["sepia".to_string()], true).unwrap();
        cmd_set(&config, &path, 500.0, "sepia", "amount", "80").unwrap();
        cmd_toggle(&config, &path, 0.0).unwrap();

        let snapshot: AnimationSnapshot = JsonFileStore::new(&path).read().unwrap();
        let times: Vec<f32> = snapshot.keyframes.iter().map(|k| k.time).collect();
        assert_eq!(times, vec![0.0, 500.0]);
        assert_eq!(
            snapshot.keyframes[1].value["sepia"]["amount"],
            ParamValue::Number(80.0)
        );
        assert!(cmd_new(&config, &path, &[], false).is_err());

        std::fs::remove_file(&path).unwrap();
    }
}
