use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sticky_parallax::{
    DomHost as _, HostEvent, MemoryDom, PageSpec, ParallaxOptions, StickyParallax, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "sticky-parallax", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the effect on a page and report accepted and rejected containers.
    Check(CheckArgs),
    /// Scroll a page and print the controller state after every frame.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct OptionArgs {
    /// Page description JSON.
    #[arg(long)]
    page: PathBuf,

    /// Options JSON (`containerSelector`, `maxOffset`, `opacityOffset`, `padding`).
    #[arg(long)]
    options: Option<PathBuf>,

    /// Override `containerSelector`.
    #[arg(long)]
    selector: Option<String>,

    /// Override `maxOffset` (px).
    #[arg(long)]
    max_offset: Option<f64>,

    /// Override `opacityOffset` (px).
    #[arg(long)]
    opacity_offset: Option<f64>,

    /// Override `padding` (px).
    #[arg(long)]
    padding: Option<f64>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    #[command(flatten)]
    common: OptionArgs,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    common: OptionArgs,

    /// First scroll position (px).
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last scroll position (px); defaults to the bottom of the page.
    #[arg(long)]
    to: Option<f64>,

    /// Scroll distance between frames (px).
    #[arg(long, default_value_t = 100.0)]
    step: f64,

    /// Resize the viewport to this height before sweeping.
    #[arg(long)]
    resize_height: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn load(args: &OptionArgs) -> anyhow::Result<(MemoryDom, ParallaxOptions)> {
    let page = PageSpec::from_path(&args.page)
        .with_context(|| format!("load page '{}'", args.page.display()))?;
    let dom = page.build().context("build page")?;

    let mut opts = match &args.options {
        Some(path) => ParallaxOptions::from_path(path)
            .with_context(|| format!("load options '{}'", path.display()))?,
        None => ParallaxOptions::default(),
    };
    if let Some(selector) = &args.selector {
        opts.container_selector = selector.clone();
    }
    if let Some(v) = args.max_offset {
        opts.max_offset = v;
    }
    if let Some(v) = args.opacity_offset {
        opts.opacity_offset = v;
    }
    if let Some(v) = args.padding {
        opts.padding = v;
    }
    Ok((dom, opts))
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let (mut dom, opts) = load(&args.common)?;
    let mut parallax = StickyParallax::new(opts)?;
    let report = parallax.start(&mut dom)?;
    parallax.stop(&mut dom)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &report).context("write report")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !args.step.is_finite() || args.step <= 0.0 {
        anyhow::bail!("--step must be a positive number of pixels");
    }
    if !args.from.is_finite() || args.to.is_some_and(|to| !to.is_finite()) {
        anyhow::bail!("--from and --to must be finite scroll positions");
    }
    let (mut dom, opts) = load(&args.common)?;
    let mut parallax = StickyParallax::new(opts)?;
    parallax.start(&mut dom)?;

    if let Some(height) = args.resize_height {
        let width = dom.viewport().width;
        dom.resize(Viewport::new(width, height)?);
        run_frame(&mut parallax, &mut dom, HostEvent::Resize)?;
    }

    let to = args.to.unwrap_or_else(|| dom.max_scroll());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut y = args.from;
    let mut frames = 0usize;
    loop {
        let scroll_y = dom.scroll_to(y);
        run_frame(&mut parallax, &mut dom, HostEvent::Scroll)?;
        let line = serde_json::json!({
            "scroll_y": scroll_y,
            "containers": parallax.snapshot(),
        });
        writeln!(out, "{line}")?;
        frames += 1;

        if y >= to {
            break;
        }
        y = (y + args.step).min(to);
    }

    parallax.stop(&mut dom)?;
    tracing::debug!(frames, "sweep finished");
    Ok(())
}

fn run_frame(
    parallax: &mut StickyParallax,
    dom: &mut MemoryDom,
    event: HostEvent,
) -> anyhow::Result<()> {
    parallax.handle_event(dom, event);
    if dom.take_frame_requests() > 0 {
        parallax.on_animation_frame(dom)?;
    }
    Ok(())
}
