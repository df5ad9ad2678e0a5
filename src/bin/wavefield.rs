use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    str::FromStr as _,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wavefield", version)]
struct Cli {
    /// Raise log verbosity (repeat for more).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a timeline document and report what it contains.
    Validate(SceneArgs),
    /// Evaluate the timeline at one instant and print the sample as JSON.
    Eval(EvalArgs),
    /// Render a top-down PNG of every tile at one timeline frame.
    Frame(FrameArgs),
    /// Simulate playback headlessly and print status lines.
    Play(PlayArgs),
    /// List the built-in and preset gradient profiles.
    Gradients(GradientArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Live parameter JSON applied before the timeline.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Gradient preset JSON to install.
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Parameter override `name=value` (clamped). May be repeated.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<String>,
}

#[derive(Args, Debug)]
struct EvalArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Time in seconds.
    #[arg(long, conflicts_with = "frame")]
    time: Option<f64>,

    /// Frame index (0-based).
    #[arg(long)]
    frame: Option<u64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Pixels per grid point.
    #[arg(long, default_value_t = 2)]
    scale: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Render ticks per second of simulated wall clock.
    #[arg(long, default_value_t = 60)]
    tick_rate: u32,

    /// Upper bound on simulated ticks.
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Print a status line every N ticks.
    #[arg(long, default_value_t = 30)]
    every: u64,

    /// Feed a flat audio spectrum at this level (0-255).
    #[arg(long)]
    audio_level: Option<u8>,

    /// Synthesize tiles on a worker pool.
    #[arg(long)]
    parallel: bool,
}

#[derive(Args, Debug)]
struct GradientArgs {
    /// Gradient preset JSON to install before listing.
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Sample each profile at this many evenly spaced positions.
    #[arg(long, default_value_t = 5)]
    samples: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Eval(args) => cmd_eval(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
        Command::Gradients(args) => cmd_gradients(args),
    }
}

fn init_tracing(verbose: u8) {
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

fn read_params_json(path: &Path) -> anyhow::Result<wavefield::FieldParams> {
    let f = File::open(path).with_context(|| format!("open params '{}'", path.display()))?;
    let r = BufReader::new(f);
    let params: wavefield::FieldParams =
        serde_json::from_reader(r).with_context(|| "parse params JSON")?;
    Ok(params)
}

fn parse_override(raw: &str) -> anyhow::Result<(wavefield::ParamKey, f64)> {
    let (name, value) = raw
        .split_once('=')
        .with_context(|| format!("override '{raw}' is not NAME=VALUE"))?;
    let key = wavefield::ParamKey::from_str(name.trim())?;
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("override '{raw}' has a non-numeric value"))?;
    Ok((key, value))
}

fn build_engine<M: wavefield::ModulationSource>(
    scene: &SceneArgs,
    modulation: M,
    opts: wavefield::EngineOpts,
) -> anyhow::Result<wavefield::Engine<M>> {
    let mut engine = wavefield::Engine::new(modulation, opts)?;

    if let Some(path) = &scene.presets {
        let presets = wavefield::GradientPresetFile::from_path(path)
            .with_context(|| format!("load gradient presets '{}'", path.display()))?;
        engine.install_presets(presets);
    }
    if let Some(path) = &scene.params {
        engine.replace_params(read_params_json(path)?);
    }
    for raw in &scene.overrides {
        let (key, value) = parse_override(raw)?;
        let stored = engine.set_param(key, value);
        tracing::debug!(param = %key, requested = value, stored, "override");
    }

    engine
        .load_timeline_path(&scene.in_path)
        .with_context(|| format!("load timeline '{}'", scene.in_path.display()))?;
    Ok(engine)
}

fn cmd_validate(args: SceneArgs) -> anyhow::Result<()> {
    let engine = build_engine(
        &args,
        wavefield::NullModulation,
        wavefield::EngineOpts::default(),
    )?;
    let timeline = engine.state().timeline();

    println!("fps:       {}", timeline.fps().get());
    println!("duration:  {:.2}s", timeline.duration_seconds());
    println!("frames:    {}", timeline.total_frames());
    println!("loop:      {}", timeline.looping());
    println!("keyframes: {}", timeline.keyframes().len());
    for kf in timeline.keyframes() {
        println!(
            "  #{:<16} t={:>7.3}s  {:?}  reps={}",
            kf.id,
            kf.time_seconds,
            kf.easing,
            kf.parameters.grid_repetitions
        );
    }
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let engine = build_engine(
        &args.scene,
        wavefield::NullModulation,
        wavefield::EngineOpts::default(),
    )?;
    let timeline = engine.state().timeline();

    let time = match (args.time, args.frame) {
        (Some(t), _) => t,
        (None, Some(f)) => timeline.frame_time(wavefield::FrameIndex(f)),
        (None, None) => 0.0,
    };
    let Some(sample) = timeline.evaluate_with(time, engine.opts().flag_blend) else {
        anyhow::bail!("timeline has no keyframes");
    };

    let out = serde_json::json!({
        "timeSeconds": time,
        "camera": sample.camera,
        "parameters": sample.params.sanitized(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Largest PNG side `frame` will allocate.
const MAX_IMAGE_SIDE: u32 = 16_384;

/// Side of the square canvas for `reps` tiles per side at `scale` pixels per point.
fn canvas_side(reps: usize, scale: u32) -> anyhow::Result<u32> {
    reps.checked_mul(wavefield::GRID_SIZE)
        .and_then(|points| u32::try_from(points).ok())
        .and_then(|points| points.checked_mul(scale))
        .filter(|&side| side <= MAX_IMAGE_SIDE)
        .with_context(|| {
            format!(
                "image too large: {reps} tiles per side at --scale {scale} (max {MAX_IMAGE_SIDE}x{MAX_IMAGE_SIDE})"
            )
        })
}

/// Rasterizes tiles seen from above, one `scale x scale` block per grid point.
struct TopDownSink {
    scale: u32,
    image: Option<anyhow::Result<image::RgbImage>>,
}

impl wavefield::RenderSink for TopDownSink {
    fn render_frame(&mut self, frame: &wavefield::RenderFrame<'_>) {
        let reps = frame
            .tiles
            .iter()
            .map(|t| t.coords().0.max(t.coords().1) + 1)
            .max()
            .unwrap_or(1);
        let side = match canvas_side(reps, self.scale) {
            Ok(side) => side,
            Err(e) => {
                self.image = Some(Err(e));
                return;
            }
        };
        let mut img = image::RgbImage::new(side, side);

        for (tile, shading) in frame.tiles.iter().zip(frame.shading) {
            let (gx, gz) = tile.coords();
            for (p, color) in tile.points().iter().zip(&shading.colors) {
                let px = (gx * wavefield::GRID_SIZE + p.i) as u32 * self.scale;
                let pz = (gz * wavefield::GRID_SIZE + p.j) as u32 * self.scale;
                let rgb = image::Rgb(color.to_rgb8());
                for dy in 0..self.scale {
                    for dx in 0..self.scale {
                        img.put_pixel(px + dx, pz + dy, rgb);
                    }
                }
            }
        }
        self.image = Some(Ok(img));
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if args.scale == 0 {
        anyhow::bail!("--scale must be at least 1");
    }
    let mut engine = build_engine(
        &args.scene,
        wavefield::NullModulation,
        wavefield::EngineOpts::default(),
    )?;
    let frame = i64::try_from(args.frame).context("frame index out of range")?;
    engine.scrub(frame);

    let time_secs = engine
        .state()
        .timeline()
        .frame_time(engine.state().playback().current_frame());
    let mut sink = TopDownSink {
        scale: args.scale,
        image: None,
    };
    engine.tick(0.0, time_secs, &mut sink);
    let img = sink
        .image
        .context("engine produced no frame for the sink")??;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    if args.tick_rate == 0 {
        anyhow::bail!("--tick-rate must be at least 1");
    }
    let every = args.every.max(1);

    let mut modulation = wavefield::LiveModulation::new();
    if let Some(level) = args.audio_level {
        let bins = vec![level; wavefield::ANALYSER_BINS];
        modulation
            .audio_slot()
            .publish(wavefield::AudioSpectrum::from_bytes(&bins));
        modulation.set_audio_playing(true);
    }

    let opts = wavefield::EngineOpts {
        synth: wavefield::SynthOptions {
            parallel: args.parallel,
            ..wavefield::SynthOptions::default()
        },
        ..wavefield::EngineOpts::default()
    };
    let mut engine = build_engine(&args.scene, modulation, opts)?;
    engine.jump_start();
    engine.play();

    let delta_ms = 1000.0 / f64::from(args.tick_rate);
    let mut sink = wavefield::NullSink;
    let mut wraps = 0u64;
    for n in 0..args.max_ticks {
        let time_secs = n as f64 * delta_ms / 1000.0;
        let report = engine.tick(delta_ms, time_secs, &mut sink);
        if report.wrapped {
            wraps += 1;
        }
        if n % every == 0 || report.finished {
            println!("{}", engine.status_line());
        }
        if report.finished {
            eprintln!("finished after {} ticks", n + 1);
            return Ok(());
        }
    }

    eprintln!("stopped after {} ticks ({wraps} wraps)", args.max_ticks);
    Ok(())
}

fn cmd_gradients(args: GradientArgs) -> anyhow::Result<()> {
    let mut library = wavefield::GradientLibrary::default();
    if let Some(path) = &args.presets {
        let presets = wavefield::GradientPresetFile::from_path(path)
            .with_context(|| format!("load gradient presets '{}'", path.display()))?;
        presets.install(&mut library);
    }

    let samples = args.samples.max(2);
    for (idx, profile) in library.profiles().iter().enumerate() {
        let kind = if idx < library.builtin_count() {
            "builtin"
        } else {
            "saved"
        };
        let colors: Vec<String> = (0..samples)
            .map(|k| {
                let t = k as f64 / (samples - 1) as f64;
                profile.color_at(t).to_hex_string()
            })
            .collect();
        println!("{idx:>3}  {kind:<8} {:<16} {}", profile.name(), colors.join(" "));
    }
    Ok(())
}
