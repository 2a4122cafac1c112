use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

use rtnpr::{
    AnimationSettings, Command, HeadlessEngine, HeadlessOpts, RunConfig, RunController,
    RunOutcome, ToneMode,
};

#[derive(Parser, Debug)]
#[command(name = "rtnpr", version, about = "Render a mesh as a still or a shadow animation")]
struct Cli {
    /// Input mesh (.obj, triangles only).
    mesh: PathBuf,

    /// JSON run configuration; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for screenshots and the animation folder.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Uniform mesh scale.
    #[arg(long)]
    scale: Option<f32>,

    /// Vertical mesh offset.
    #[arg(long)]
    shift_z: Option<f32>,

    /// Camera vertical field of view in degrees.
    #[arg(long)]
    fov: Option<f32>,

    /// Preview sample budget.
    #[arg(long)]
    spp: Option<u32>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long, value_enum)]
    tone: Option<ToneChoice>,

    /// Render the mesh-over-difference visualization.
    #[arg(long)]
    diff: bool,

    /// Write the PNG sequence only, without assembling a video.
    #[arg(long)]
    no_video: bool,

    /// Command the headless session answers with.
    #[arg(long, value_enum, default_value_t = CommandChoice::Image)]
    command: CommandChoice,

    /// Animation frame count.
    #[arg(long, default_value_t = 30)]
    frames: u32,

    /// Sweep the sun across the sky during the animation.
    #[arg(long)]
    animate_light: bool,

    /// Keep the camera still during the animation.
    #[arg(long)]
    static_camera: bool,

    /// Log debug output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CommandChoice {
    None,
    Image,
    Animation,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ToneChoice {
    Reinhard,
    Linear,
    Raw,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = build_config(&cli)?;
    let mut engine = HeadlessEngine::new(HeadlessOpts {
        command: match cli.command {
            CommandChoice::None => Command::None,
            CommandChoice::Image => Command::RenderImage,
            CommandChoice::Animation => Command::RenderAnimation,
        },
        animation: AnimationSettings {
            frames: cli.frames,
            light_animated: cli.animate_light,
            camera_animated: !cli.static_camera,
        },
    });

    let mut controller = RunController::new(cfg);
    match controller.run(&mut engine)? {
        RunOutcome::NoCommand => eprintln!("no command issued, nothing written"),
        RunOutcome::Image(path) => eprintln!("wrote {}", path.display()),
        RunOutcome::Animation { report, dir, video } => {
            eprintln!(
                "wrote {} / {} frames to {}",
                report.written,
                report.requested,
                dir.display()
            );
            if let Some(video) = video {
                eprintln!("wrote {}", video.display());
            }
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> anyhow::Result<RunConfig> {
    let mut cfg = match &cli.config {
        Some(path) => RunConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => RunConfig::default(),
    };

    cfg.mesh_path = cli.mesh.clone();
    if let Some(dir) = &cli.out_dir {
        cfg.output_dir = dir.clone();
    }
    if let Some(v) = cli.scale {
        cfg.placement.scale = v;
    }
    if let Some(v) = cli.shift_z {
        cfg.placement.shift_z = v;
    }
    if let Some(v) = cli.fov {
        cfg.fov_deg = v;
    }
    if let Some(v) = cli.spp {
        cfg.options.spp = v;
    }
    if let Some(v) = cli.width {
        cfg.options.width = v;
    }
    if let Some(v) = cli.height {
        cfg.options.height = v;
    }
    if let Some(t) = cli.tone {
        cfg.options.tone_mode = match t {
            ToneChoice::Reinhard => ToneMode::Reinhard,
            ToneChoice::Linear => ToneMode::Linear,
            ToneChoice::Raw => ToneMode::Raw,
        };
    }
    cfg.difference |= cli.diff;
    if cli.no_video {
        cfg.encode_video = false;
    }
    Ok(cfg)
}
