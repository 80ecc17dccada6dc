use bench_config::BenchConfig;
use bench_logger as logger;
use bench_ripenv::{
    commands::{
        config::{self, ConfigAction},
        report::{self, ReportCommand},
        run::{self, RunCommand},
        translate::{self, TranslateCommand},
    },
    errors::BenchError,
    setup, GlobalOpts,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bench-ripenv")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Benchmark ripenv vs pipenv vs uv",
    long_about = "Times lock, sync and install for ripenv, pipenv and uv under cold, warm and no-op cache states using hyperfine."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run benchmarks against a fixture
    Run(RunCommand),
    /// Translate a Pipfile into a pyproject.toml
    Translate(TranslateCommand),
    /// Summarize exported hyperfine results
    Report(ReportCommand),
    /// Configure bench-ripenv
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logger::verbosity_to_filter().into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn load_config() -> BenchConfig {
    BenchConfig::load().unwrap_or_else(|e| {
        logger::warn(&format!("Failed to load config, using defaults: {}", e));
        BenchConfig::default()
    })
}

fn dispatch(cli: Cli) -> Result<(), BenchError> {
    match cli.command {
        Commands::Run(cmd) => run::handle_run(cmd, &load_config(), &cli.global).map(|_| ()),
        Commands::Translate(cmd) => translate::handle_translate(cmd, &load_config()),
        Commands::Report(cmd) => report::handle_report(cmd, &load_config()),
        Commands::Config { action } => config::handle_config(action, &cli.global),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    init_tracing();

    if let Err(e) = dispatch(cli) {
        logger::error(&e.to_string());
        setup::report_setup_failure(&e);
        logger::show_log_path();
        std::process::exit(1);
    }
}
