//! Bento CLI - render, validate and inspect profile pages.

#![allow(clippy::needless_pass_by_value, clippy::doc_markdown)]

use bento_core::{media, validate_content, EditorConfig, Size, UserProfile, WidgetKind};
use bento_layout::{flow_slots, grid_slots, PresetCatalog, Slot};
use bento_render::{html_document, render_profile, RenderContext};
use bento_store::{JsonFileRepository, ProfileStore, TracingSink};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bento")]
#[command(about = "Link-in-bio profile pages made of widget cards")]
#[command(version)]
struct Cli {
    /// Editor configuration file (default: XDG config, then built-in)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a profile JSON file as HTML
    Render {
        /// Profile JSON file
        profile: PathBuf,

        /// Compact card presentation
        #[arg(long)]
        preview: bool,

        /// Show edit, delete and resize controls
        #[arg(long)]
        edit: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check widget content and positions of a profile JSON file
    Validate {
        /// Profile JSON file
        profile: PathBuf,
    },

    /// Print the card slots a layout mode would produce
    Layout {
        /// Profile JSON file
        profile: PathBuf,

        /// Layout mode
        #[arg(short, long, value_enum, default_value = "free-size")]
        mode: Mode,

        /// Container width in pixels (free-size mode)
        #[arg(short, long, default_value = "760")]
        width: f32,
    },

    /// Snap a raw size to the nearest preset
    Snap {
        /// Width in pixels
        width: f32,
        /// Height in pixels
        height: f32,
    },

    /// Show the identifiers extracted from a pasted URL
    Extract {
        /// URL to inspect
        url: String,
    },

    /// Create a starter profile in a directory, or load the existing one
    Init {
        /// Directory holding bentoProfile-<owner>.json files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Owner key
        owner: String,

        /// Public handle
        #[arg(short, long)]
        username: Option<String>,

        /// Name shown in the header
        #[arg(long)]
        display_name: Option<String>,
    },

    /// Print the default editor configuration
    DefaultConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Standalone HTML document
    Html,
    /// Presentation tree as JSON
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Wrapping rows of free-size cards
    FreeSize,
    /// Fixed column grid using gridSpan/rowSpan
    Grid,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Render {
            profile,
            preview,
            edit,
            format,
            output,
        } => {
            let ctx = RenderContext {
                preview,
                editing: edit,
                ..RenderContext::public()
            }
            .with_config(&load_config(config_path));
            render(&profile, &ctx, format, output.as_deref());
        }
        Commands::Validate { profile } => {
            validate(&profile);
        }
        Commands::Layout {
            profile,
            mode,
            width,
        } => {
            layout(&profile, &load_config(config_path), mode, width);
        }
        Commands::Snap { width, height } => {
            snap(&load_config(config_path), width, height);
        }
        Commands::Extract { url } => {
            extract(&url);
        }
        Commands::Init {
            dir,
            owner,
            username,
            display_name,
        } => {
            let username = username.unwrap_or_else(|| owner.clone());
            let display_name = display_name.unwrap_or_else(|| username.clone());
            init(&dir, &owner, &username, &display_name, &load_config(config_path));
        }
        Commands::DefaultConfig => {
            print!("{}", EditorConfig::default_yaml());
        }
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn load_config(path: Option<&Path>) -> EditorConfig {
    EditorConfig::load(path).unwrap_or_else(|e| fail(format!("Failed to load config: {e}")))
}

fn read_json(path: &Path) -> Value {
    let contents = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("Failed to read {}: {e}", path.display())));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| fail(format!("Invalid JSON in {}: {e}", path.display())))
}

fn read_profile(path: &Path) -> UserProfile {
    serde_json::from_value(read_json(path))
        .unwrap_or_else(|e| fail(format!("Not a profile: {}: {e}", path.display())))
}

fn render(path: &Path, ctx: &RenderContext, format: OutputFormat, output: Option<&Path>) {
    let profile = read_profile(path);
    tracing::debug!(path = %path.display(), widgets = profile.widgets.len(), "rendering profile");
    let page = render_profile(&profile, ctx);
    let text = match format {
        OutputFormat::Html => html_document(&profile, &page),
        OutputFormat::Json => serde_json::to_string_pretty(&page)
            .unwrap_or_else(|e| fail(format!("Failed to serialize page: {e}"))),
    };

    match output {
        Some(out) => {
            fs::write(out, text)
                .unwrap_or_else(|e| fail(format!("Failed to write {}: {e}", out.display())));
            println!("Rendered {} widgets to {}", profile.widgets.len(), out.display());
        }
        None => println!("{text}"),
    }
}

/// Problems and warnings found in a raw profile document.
#[derive(Debug, Default, PartialEq, Eq)]
struct Report {
    problems: Vec<String>,
    warnings: Vec<String>,
}

fn check_profile(raw: &Value) -> Report {
    let mut report = Report::default();
    if let Err(e) = serde_json::from_value::<UserProfile>(raw.clone()) {
        report.problems.push(format!("profile: {e}"));
        return report;
    }

    let widgets = raw
        .get("widgets")
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice);

    let mut positions = Vec::with_capacity(widgets.len());
    for (index, widget) in widgets.iter().enumerate() {
        let id = widget.get("id").and_then(Value::as_str).unwrap_or("<no id>");
        let type_name = widget.get("type").and_then(Value::as_str).unwrap_or_default();
        let content = widget.get("content").cloned().unwrap_or(Value::Null);

        match type_name.parse::<WidgetKind>() {
            Ok(kind) => {
                if let Err(e) = validate_content(kind, content) {
                    report.problems.push(format!("widget {index} ({id}): {e}"));
                }
            }
            Err(_) => report.warnings.push(format!(
                "widget {index} ({id}): unsupported type '{type_name}', shown as a placeholder"
            )),
        }

        match widget.get("position").and_then(Value::as_u64) {
            Some(position) => positions.push(position),
            None => report
                .problems
                .push(format!("widget {index} ({id}): missing position")),
        }
    }

    if positions.len() == widgets.len() {
        positions.sort_unstable();
        let contiguous = positions.iter().zip(0u64..).all(|(&p, expected)| p == expected);
        if !contiguous {
            report.problems.push(format!(
                "positions are not 0..{}: {positions:?}",
                widgets.len().saturating_sub(1)
            ));
        }
    }
    report
}

fn validate(path: &Path) {
    println!("Checking profile: {}", path.display());
    let report = check_profile(&read_json(path));

    for warning in &report.warnings {
        println!("  warning: {warning}");
    }
    if report.problems.is_empty() {
        println!("Profile valid!");
        return;
    }
    for problem in &report.problems {
        eprintln!("  error: {problem}");
    }
    fail(format!("{} problem(s) found", report.problems.len()));
}

fn layout(path: &Path, config: &EditorConfig, mode: Mode, width: f32) {
    let mut profile = read_profile(path);
    profile.normalize_positions();
    let slots: Vec<Slot> = match mode {
        Mode::FreeSize => flow_slots(
            &profile.widgets,
            config.default_size,
            width,
            config.flow_gap as f32,
        ),
        Mode::Grid => grid_slots(&profile.widgets, &config.grid),
    };

    for slot in &slots {
        println!(
            "{:>3}  {:<36}  x={:<6} y={:<6} {}x{}",
            slot.index,
            slot.id.as_str(),
            slot.rect.x, slot.rect.y, slot.rect.width, slot.rect.height
        );
    }
}

fn snap(config: &EditorConfig, width: f32, height: f32) {
    let catalog = PresetCatalog::from_config(config)
        .unwrap_or_else(|e| fail(format!("Invalid preset catalog: {e}")));
    let preset = catalog.snap(Size::new(width, height));
    println!("{} ({}x{})", preset.name, preset.width, preset.height);
}

fn extract(url: &str) {
    let youtube = media::extract_youtube_id(url);
    let spotify = media::extract_spotify_id(url);
    let instagram = media::instagram_username(url);
    let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

    println!("youtube:   {}", or_dash(&youtube));
    println!("spotify:   {}", or_dash(&spotify));
    println!("instagram: {}", or_dash(&instagram));
    match media::link_target(url) {
        Some(target) => {
            println!("link:      {}", target.href);
            println!("domain:    {}", target.domain);
        }
        None => println!("link:      -"),
    }
}

fn init(dir: &Path, owner: &str, username: &str, display_name: &str, config: &EditorConfig) {
    fs::create_dir_all(dir)
        .unwrap_or_else(|e| fail(format!("Failed to create {}: {e}", dir.display())));
    let repository = JsonFileRepository::new(dir);
    let path = repository.path_for(owner);
    let mut store =
        ProfileStore::new(repository, TracingSink).with_default_size(config.default_size);

    match store.load_or_create(owner, username, display_name) {
        Ok(profile) => println!(
            "Profile '{}' with {} widgets at {}",
            profile.username,
            profile.widgets.len(),
            path.display()
        ),
        Err(e) => fail(format!("Failed to open profile: {e}")),
    }
}
