use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fogwalk_core::{
    RunOutcome, Scenario, TextScenarioPaths, Transcript,
    scenario_file::{load_scenario_json, load_text_scenario, save_scenario_json},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::{RunArgs, RunSettings, ScenarioSource};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Navigate a scenario and write the transcript
    Run(RunArgs),
    /// Convert the three text input files into one JSON scenario
    Export {
        #[arg(long)]
        nodes: PathBuf,
        #[arg(long)]
        edges: PathBuf,
        #[arg(long)]
        objectives: PathBuf,
        /// Destination JSON file
        #[arg(long)]
        scenario: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run(&RunSettings::resolve(&args)?),
        Command::Export { nodes, edges, objectives, scenario } => {
            export(&TextScenarioPaths { nodes, edges, objectives }, &scenario)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FOGWALK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load(source: &ScenarioSource) -> Result<Scenario> {
    match source {
        ScenarioSource::Text(paths) => load_text_scenario(paths).with_context(|| {
            format!(
                "Failed to load text scenario ({}, {}, {})",
                paths.nodes.display(),
                paths.edges.display(),
                paths.objectives.display()
            )
        }),
        ScenarioSource::Json(path) => load_scenario_json(path)
            .with_context(|| format!("Failed to load scenario file: {}", path.display())),
    }
}

fn run(settings: &RunSettings) -> Result<()> {
    let scenario = load(&settings.source)?;
    let mut expedition = scenario
        .into_expedition(settings.engine.clone())
        .context("Scenario failed validation")?;

    let outcome = expedition.run_to_end();
    let transcript = Transcript::new(expedition.log());
    match &settings.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create transcript file: {}", path.display()))?;
            transcript
                .write_to(BufWriter::new(file))
                .with_context(|| format!("Failed to write transcript: {}", path.display()))?;
        }
        None => transcript.write_to(io::stdout().lock()).context("Failed to write transcript")?,
    }

    info!(
        ?outcome,
        objectives = expedition.objectives().len(),
        at = %expedition.traveler().pos(),
        sight_radius = expedition.traveler().sight_radius(),
        lines = transcript.len(),
        moves = expedition.moves(),
        replans = expedition.replans(),
        digest = %format!("{:016x}", transcript.digest()),
        "run complete"
    );
    match outcome {
        RunOutcome::Completed => {}
        RunOutcome::Stuck { objective, at } => {
            warn!(objective, %at, "run stopped before every objective was reached");
        }
        RunOutcome::MoveBudgetExceeded { moves } => {
            warn!(moves, "run stopped at the configured move budget");
        }
    }
    Ok(())
}

fn export(paths: &TextScenarioPaths, destination: &Path) -> Result<()> {
    let scenario = load(&ScenarioSource::Text(paths.clone()))?;
    scenario.build_grid().context("Scenario failed validation")?;
    save_scenario_json(destination, &scenario)
        .with_context(|| format!("Failed to write scenario file: {}", destination.display()))?;
    info!(
        width = scenario.width,
        height = scenario.height,
        objectives = scenario.objectives.len(),
        path = %destination.display(),
        "scenario exported"
    );
    Ok(())
}
