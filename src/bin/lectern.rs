use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "lectern", version, about = "Lay out lecture plans as slide decks and handouts")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a plan as a deck (PPTX), handout (PDF) or page preview (PNG).
    Render(RenderArgs),
    /// Check a plan without rendering it.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input plan JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output file.
    #[arg(long)]
    out: PathBuf,

    /// Output format; inferred from the `--out` extension when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Theme override.
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Device preset override.
    #[arg(long, value_enum)]
    device: Option<DeviceChoice>,

    /// Orientation override.
    #[arg(long, value_enum)]
    orientation: Option<OrientationChoice>,

    /// Handout: title page plus cheat-sheet only.
    #[arg(long, conflicts_with = "notes_only")]
    cheatsheet_only: bool,

    /// Handout: title page plus notes only.
    #[arg(long)]
    notes_only: bool,

    /// Handout notes use the expanded sections.
    #[arg(long)]
    expanded: bool,

    /// Keep note bullets verbatim.
    #[arg(long)]
    no_expand: bool,

    /// Render options JSON; flags above override it.
    #[arg(long)]
    options: Option<PathBuf>,

    /// TTF/OTF font for drawing text in PNG previews.
    #[arg(long)]
    font: Option<PathBuf>,

    /// PNG preview: zero-based page.
    #[arg(long, default_value_t = 0)]
    page: usize,

    /// PNG preview: width in pixels.
    #[arg(long, default_value_t = 960)]
    width: u32,

    /// PNG preview: draw from the handout instead of the deck.
    #[arg(long)]
    handout: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input plan JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Pptx,
    Pdf,
    Png,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    Minimalist,
    Chalkboard,
    Corporate,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DeviceChoice {
    Desktop,
    Tablet,
    Mobile,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrientationChoice {
    Landscape,
    Portrait,
    Auto,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_plan_json(path: &Path) -> anyhow::Result<lectern::DocumentPlan> {
    let f = File::open(path).with_context(|| format!("open plan '{}'", path.display()))?;
    let plan: lectern::DocumentPlan = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse plan JSON '{}'", path.display()))?;
    plan.validate()?;
    Ok(plan)
}

fn read_options(path: Option<&Path>) -> anyhow::Result<lectern::RenderOptions> {
    let Some(path) = path else {
        return Ok(lectern::RenderOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read options '{}'", path.display()))?;
    lectern::RenderOptions::from_json(&text)
        .with_context(|| format!("parse options '{}'", path.display()))
}

fn output_format(args: &RenderArgs) -> anyhow::Result<lectern::OutputFormat> {
    if let Some(choice) = args.format {
        return Ok(match choice {
            FormatChoice::Pptx => lectern::OutputFormat::Pptx,
            FormatChoice::Pdf => lectern::OutputFormat::Pdf,
            FormatChoice::Png => lectern::OutputFormat::Png,
        });
    }
    args.out
        .extension()
        .and_then(|e| e.to_str())
        .and_then(lectern::OutputFormat::from_extension)
        .with_context(|| {
            format!(
                "cannot infer format from '{}'; pass --format",
                args.out.display()
            )
        })
}

fn apply_flags(mut opts: lectern::RenderOptions, args: &RenderArgs) -> lectern::RenderOptions {
    if let Some(t) = args.theme {
        opts.theme = Some(match t {
            ThemeChoice::Minimalist => lectern::ThemeName::Minimalist,
            ThemeChoice::Chalkboard => lectern::ThemeName::Chalkboard,
            ThemeChoice::Corporate => lectern::ThemeName::Corporate,
        });
    }
    if let Some(d) = args.device {
        opts.device_preset = Some(match d {
            DeviceChoice::Desktop => lectern::DevicePreset::Desktop,
            DeviceChoice::Tablet => lectern::DevicePreset::Tablet,
            DeviceChoice::Mobile => lectern::DevicePreset::Mobile,
        });
    }
    if let Some(o) = args.orientation {
        opts.orientation = Some(match o {
            OrientationChoice::Landscape => lectern::Orientation::Landscape,
            OrientationChoice::Portrait => lectern::Orientation::Portrait,
            OrientationChoice::Auto => lectern::Orientation::Auto,
        });
    }
    opts.cheatsheet_only |= args.cheatsheet_only;
    opts.notes_only |= args.notes_only;
    opts.include_expanded_content |= args.expanded;
    if args.no_expand {
        opts.expand_points = false;
    }
    opts
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let plan = read_plan_json(&args.in_path)?;
    let opts = apply_flags(read_options(args.options.as_deref())?, &args);
    let format = output_format(&args)?;
    let raster = lectern::RasterOptions {
        width_px: args.width,
        page: args.page,
        source: if args.handout {
            lectern::DocumentLayout::Handout
        } else {
            lectern::DocumentLayout::Deck
        },
        font_path: args.font.clone(),
    };

    let doc = lectern::render_document_with(&plan, &opts, format, &raster)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &doc.bytes)
        .with_context(|| format!("write {} '{}'", format.extension(), args.out.display()))?;

    for d in &doc.degradations {
        eprintln!("degraded: {}", serde_json::to_string(d)?);
    }
    eprintln!(
        "wrote {} ({} pages, {} bytes)",
        args.out.display(),
        doc.page_count,
        doc.bytes.len()
    );
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let plan = read_plan_json(&args.in_path)?;
    let diagrams: Vec<&str> = plan
        .diagram_requests()
        .iter()
        .map(|(kind, _)| kind.as_str())
        .collect();
    println!(
        "ok: \"{}\" ({} slides, diagrams: [{}])",
        plan.topic.trim(),
        plan.slides.len(),
        diagrams.join(", ")
    );
    Ok(())
}
