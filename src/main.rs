use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agronomic_calculator::{
    io,
    models::{LimingTarget, SoilAnalysis, SpeedInput, SpeedMode, SprayerSetup},
    visualization::{
        print_batch_table, print_fertilization_table, print_liming_recommendation,
        print_saturation_gauge, print_soil_summary, print_sprayer_report, print_volume_gauge,
    },
    Calculator, Config,
};

#[derive(Parser)]
#[command(
    name = "agro-calc",
    about = "Agronomic Calculator - Liming, fertilization and sprayer calibration",
    version,
    author
)]
struct Cli {
    /// TOML file overriding the built-in defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute base saturation, liming need and fertilization guidance
    Liming {
        /// Exchangeable potassium (cmol/dm³)
        #[arg(short = 'k', long)]
        potassium: f64,

        /// Exchangeable calcium (cmol/dm³)
        #[arg(short = 'a', long)]
        calcium: f64,

        /// Exchangeable magnesium (cmol/dm³)
        #[arg(short, long)]
        magnesium: f64,

        /// Potential acidity H+Al (cmol/dm³)
        #[arg(short = 'H', long)]
        acidity: f64,

        /// Phosphorus (mg/dm³); phosphate guidance is skipped without it
        #[arg(short, long)]
        phosphorus: Option<f64>,

        /// Desired base saturation V% (defaults to config)
        #[arg(short, long)]
        target: Option<f64>,

        /// PRNT of the lime, percent (defaults to config)
        #[arg(long)]
        prnt: Option<f64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Calibrate a boom sprayer: volume per hectare and tank autonomy
    Sprayer {
        /// Nozzle flow in L/min (defaults to config)
        #[arg(short, long)]
        flow: Option<f64>,

        /// Nozzle spacing in cm (defaults to config)
        #[arg(short, long)]
        spacing: Option<f64>,

        /// Tank capacity in L (defaults to config)
        #[arg(short = 'T', long)]
        tank: Option<f64>,

        /// Speed input: direct (panel) or timed (field run)
        #[arg(short, long, default_value = "direct")]
        mode: SpeedMode,

        /// Panel speed in km/h, direct mode
        #[arg(long, conflicts_with_all = ["distance", "time"])]
        speed: Option<f64>,

        /// Distance travelled in m, timed mode
        #[arg(short, long)]
        distance: Option<f64>,

        /// Elapsed time in s, timed mode
        #[arg(short = 't', long)]
        time: Option<f64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the liming calculation over a file of soil samples
    Batch {
        /// Input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Desired base saturation V% (defaults to config)
        #[arg(short, long)]
        target: Option<f64>,

        /// PRNT of the lime, percent (defaults to config)
        #[arg(long)]
        prnt: Option<f64>,

        /// Write results to a file (CSV or JSON) instead of a table
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the active defaults as TOML
    Defaults,

    /// Start the HTTP API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (defaults to config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("agronomic_calculator=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "agronomic_calculator=info".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(p) => Config::load(p)
            .with_context(|| format!("failed to load config from {}", p.display())),
        None => Ok(Config::default()),
    }
}

fn resolve_target(calc: &Calculator, target: Option<f64>, prnt: Option<f64>) -> LimingTarget {
    let defaults = calc.default_target();
    LimingTarget::new(
        target.unwrap_or(defaults.target_saturation),
        prnt.unwrap_or(defaults.prnt),
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_ref())?;
    let calc = Calculator::new(config);

    match cli.command {
        Commands::Liming {
            potassium,
            calcium,
            magnesium,
            acidity,
            phosphorus,
            target,
            prnt,
            json,
        } => {
            let analysis = SoilAnalysis {
                phosphorus,
                ..SoilAnalysis::new(potassium, calcium, magnesium, acidity)
            };
            let target = resolve_target(&calc, target, prnt);
            let report = calc.liming(&analysis, &target)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_soil_summary(&report);
                print_saturation_gauge(&report.state, report.target.target_saturation);
                print_liming_recommendation(&report);
                print_fertilization_table(&report.fertilization);
            }
        }

        Commands::Sprayer {
            flow,
            spacing,
            tank,
            mode,
            speed,
            distance,
            time,
            json,
        } => {
            match mode {
                SpeedMode::Direct if distance.is_some() || time.is_some() => {
                    anyhow::bail!("--distance and --time only apply to --mode timed")
                }
                SpeedMode::Timed if speed.is_some() => {
                    anyhow::bail!("--speed only applies to --mode direct")
                }
                _ => {}
            }

            let defaults = calc.default_setup(mode);
            let speed = match defaults.speed {
                SpeedInput::Direct { speed_kmh } => SpeedInput::Direct {
                    speed_kmh: speed.unwrap_or(speed_kmh),
                },
                SpeedInput::Timed {
                    distance_m,
                    elapsed_s,
                } => SpeedInput::Timed {
                    distance_m: distance.unwrap_or(distance_m),
                    elapsed_s: time.unwrap_or(elapsed_s),
                },
            };
            let setup = SprayerSetup {
                nozzle_flow: flow.unwrap_or(defaults.nozzle_flow),
                nozzle_spacing: spacing.unwrap_or(defaults.nozzle_spacing),
                tank_capacity: tank.unwrap_or(defaults.tank_capacity),
                speed,
            };
            let report = calc.sprayer(&setup)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_sprayer_report(&report);
                print_volume_gauge(report.result.volume_per_ha);
            }
        }

        Commands::Batch {
            input,
            target,
            prnt,
            output,
        } => {
            let target = resolve_target(&calc, target, prnt);
            target.validate()?;

            let samples = io::reader_for(&input)?.read(&input)?;
            println!(
                "\n{}",
                format!("Batch: {} ({} samples)", input.display(), samples.len())
                    .bold()
                    .cyan()
            );
            let entries = calc.batch(&samples, &target);

            match output {
                Some(out) => {
                    io::writer_for(&out, true)?.write(&entries, &out)?;
                    println!(
                        "{} Wrote {} results -> {}",
                        "Success:".green().bold(),
                        entries.len(),
                        out.display()
                    );
                }
                None => print_batch_table(&entries),
            }

            let failed = entries.iter().filter(|e| e.error.is_some()).count();
            if failed > 0 {
                eprintln!(
                    "{}: {failed} of {} samples could not be processed",
                    "Warning".yellow(),
                    entries.len()
                );
            }
        }

        Commands::Defaults => {
            print!("{}", calc.config().to_toml_string()?);
        }

        #[cfg(feature = "web")]
        Commands::Serve { port } => {
            let mut config = calc.config().clone();
            if let Some(port) = port {
                config.server.port = port;
            }
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(agronomic_calculator::web::start_server(config))?;
        }
    }

    Ok(())
}
