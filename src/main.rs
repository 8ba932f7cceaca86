use circsim::configuration::presets::{preset, PRESET_NAMES};
use circsim::{bench_detection, report_csv, run_headless, BenchmarkConfig, LogRenderer, Scenario, ScenarioConfig, ScriptedInput};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "circsim", about = "2D circle physics: integrators, constraints, broad phase")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Step a scenario headless, logging a summary every few frames
    Run {
        /// Scenario YAML; a bare name is looked up in `scenarios/`
        #[arg(short, long)]
        file: Option<String>,

        /// Built-in scenario used when no file is given
        #[arg(short, long, default_value = "house")]
        preset: String,

        #[arg(short, long, default_value_t = 600)]
        ticks: u64,

        /// Log every n-th frame
        #[arg(short, long, default_value_t = 60)]
        every: u64,
    },
    /// Time brute force against sweep and prune
    Bench {
        #[arg(long, value_delimiter = ',', default_values_t = [200usize, 500, 1000])]
        counts: Vec<usize>,

        #[arg(long, default_value_t = 3)]
        trials: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = 1000.0)]
        width: f64,

        #[arg(long, default_value_t = 1000.0)]
        height: f64,

        #[arg(long, default_value_t = 2.0)]
        r_min: f64,

        #[arg(long, default_value_t = 8.0)]
        r_max: f64,

        /// Print CSV instead of the table
        #[arg(long)]
        csv: bool,
    },
}

// load here to keep main clean
fn load_scenario(file: Option<String>, preset_name: &str) -> Result<ScenarioConfig> {
    let Some(file_name) = file else {
        return preset(preset_name).ok_or_else(|| {
            anyhow!("unknown preset `{preset_name}`, expected one of {PRESET_NAMES:?}")
        });
    };

    let direct = PathBuf::from(&file_name);
    let config_path = if direct.exists() {
        direct
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&file_name)
    };
    ScenarioConfig::load(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Args::parse().command {
        Command::Run { file, preset, ticks, every } => {
            let cfg = load_scenario(file, &preset)?;
            let mut scenario = Scenario::build_scenario(cfg)?;
            let mut input = ScriptedInput::new(scenario.scripted_events());
            let mut renderer = LogRenderer::new(every);

            let summary = run_headless(&mut scenario, &mut input, &mut renderer, ticks)?;
            println!(
                "{} ticks, {} events, {} checks, {} collisions",
                summary.ticks, summary.events, summary.checks, summary.collisions
            );
        }
        Command::Bench { counts, trials, seed, width, height, r_min, r_max, csv } => {
            let cfg = BenchmarkConfig {
                width,
                height,
                radius_min: r_min,
                radius_max: r_max,
                counts,
                trials,
                seed,
            };
            let rows = bench_detection(&cfg)?;
            if csv {
                print!("{}", report_csv(&rows));
            } else {
                println!("=== broad phase benchmark (detection only) ===");
                for row in &rows {
                    println!("{row}");
                }
            }
        }
    }

    Ok(())
}
