use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "graphshot", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Snapshot the active graph, independent of the viewport.
    Snapshot(SnapshotArgs),
    /// Render the live viewport as the editor shows it.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    /// Input workspace JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long, required_unless_present = "data_url")]
    out: Option<PathBuf>,

    /// Margin around the node bounds, in logical units.
    #[arg(long, default_value_t = graphshot::DEFAULT_PADDING)]
    padding: f64,

    /// Device pixel ratio (defaults to the canvas config's value).
    #[arg(long)]
    dpr: Option<f64>,

    /// Print the snapshot as a PNG data URL on stdout.
    #[arg(long)]
    data_url: bool,

    /// Painter to draw nodes with.
    #[arg(long, value_enum, default_value_t = PainterChoice::Default)]
    painter: PainterChoice,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input workspace JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Painter to draw nodes with.
    #[arg(long, value_enum, default_value_t = PainterChoice::Default)]
    painter: PainterChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PainterChoice {
    Default,
    Silhouette,
}

/// On-disk document: the editor's graphs plus the live canvas state.
#[derive(serde::Deserialize, Debug)]
struct WorkspaceDoc {
    #[serde(flatten)]
    workspace: graphshot::Workspace,
    #[serde(default)]
    canvas: graphshot::CanvasConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn read_workspace_json(path: &Path) -> anyhow::Result<WorkspaceDoc> {
    let f = File::open(path).with_context(|| format!("open workspace '{}'", path.display()))?;
    let r = BufReader::new(f);
    let doc: WorkspaceDoc =
        serde_json::from_reader(r).with_context(|| "parse workspace JSON")?;
    doc.workspace.validate()?;
    Ok(doc)
}

fn make_canvas(config: graphshot::CanvasConfig, choice: PainterChoice) -> graphshot::LiveCanvas {
    let painter: Arc<dyn graphshot::GraphPainter> = match choice {
        PainterChoice::Default => Arc::new(graphshot::DefaultPainter::default()),
        PainterChoice::Silhouette => Arc::new(graphshot::SilhouettePainter {
            colour: graphshot::Rgba8::rgb(0xe0, 0xe0, 0xe0),
        }),
    };
    graphshot::LiveCanvas::new(config, painter)
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let doc = read_workspace_json(&args.in_path)?;
    let mut canvas = make_canvas(doc.canvas, args.painter);
    if let Some(dpr) = args.dpr {
        canvas.config.device_pixel_ratio = dpr;
    }

    let Some(snapshot) =
        graphshot::capture_canvas_screenshot(Some(&doc.workspace), Some(&canvas), args.padding)
    else {
        anyhow::bail!("no screenshot available");
    };

    if let Some(out) = &args.out {
        snapshot.save_png(out)?;
        eprintln!(
            "wrote {} ({}x{})",
            out.display(),
            snapshot.width,
            snapshot.height
        );
    }
    if args.data_url {
        println!("{}", snapshot.to_data_url());
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let doc = read_workspace_json(&args.in_path)?;
    let canvas = make_canvas(doc.canvas, args.painter);

    let frame = canvas.render_frame(doc.workspace.active_graph())?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
