use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "eduviz", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a visualization script from a text file.
    Generate(GenerateArgs),
    /// Print the built-in registry as JSON.
    Registry,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input text file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Topic key selecting a template catalog.
    #[arg(long, default_value = "pca")]
    topic: String,

    /// Maximum critique/revise iterations.
    #[arg(long, default_value_t = 3)]
    iterations: usize,

    /// Output directory for scripts, report and renders. Without it the script goes to stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Registry JSON replacing the built-in one.
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Render approved scenes with manim and join them with ffmpeg.
    #[arg(long)]
    render: bool,

    /// Per-invocation timeout for external tools.
    #[arg(long, default_value_t = 300)]
    timeout_secs: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Registry => cmd_registry(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read input text '{}'", args.in_path.display()))?;

    let registry = match &args.registry {
        Some(path) => eduviz::Registry::load(path)?,
        None => eduviz::Registry::builtin(),
    };

    let opts = eduviz::PipelineOpts {
        topic: args.topic,
        max_iterations: args.iterations,
        output_dir: args.out,
        render: args.render,
        tool_timeout: Duration::from_secs(args.timeout_secs),
    };

    let outcome = eduviz::PipelineController::new(&registry).run(&text, &opts)?;

    if opts.output_dir.is_none() {
        print!("{}", outcome.script());
    }

    if let Some(last) = outcome.last() {
        for a in &last.analyses {
            eprintln!(
                "{:<28} {:>4.1}/10  {}",
                a.scene,
                a.overall_score,
                a.approval.as_str()
            );
        }
    }
    eprintln!(
        "{} after {} iteration(s): {} concept(s), {} scene(s)",
        if outcome.pipeline_success { "approved" } else { "not approved" },
        outcome.iterations(),
        outcome.concepts.len(),
        outcome.scenes.len()
    );
    for d in &outcome.degradations {
        eprintln!("degraded: {d}");
    }
    for f in outcome.files.iter().chain(&outcome.videos).chain(&outcome.final_video) {
        eprintln!("wrote {}", f.display());
    }
    Ok(())
}

fn cmd_registry() -> anyhow::Result<()> {
    let json = eduviz::Registry::builtin().to_json_pretty()?;
    println!("{json}");
    Ok(())
}
