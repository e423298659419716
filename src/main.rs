use anyhow::Context;
use clap::{Parser, Subcommand};
use signal_backtest::backtest::{
    to_price_lines, BacktestRunner, MarketScenario, SyntheticSeriesGenerator,
};
use signal_backtest::config::AppConfig;
use signal_backtest::data::{discover_price_files, load_price_file, InputOrder};
use signal_backtest::report::ResultsBook;
use signal_backtest::strategy::strategy_for;
use signal_backtest::StrategyKind;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "signal-backtest", about = "Backtest band-crossover signals over daily closes")]
struct Cli {
    /// Config file (defaults to ./backtest.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Backtest every <TICKER>.txt price file under all three strategies
    Run {
        #[arg(long)]
        prices_dir: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum)]
        order: Option<InputOrder>,
        /// Print a per-strategy report for each ticker
        #[arg(long)]
        verbose: bool,
    },
    /// Write a synthetic price file, newest close first
    Synthetic {
        #[arg(long, value_enum, default_value = "sideways")]
        scenario: MarketScenario,
        #[arg(long, default_value_t = 250)]
        days: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    setup_logging(&config.log_filter);

    match cli.command {
        Command::Run {
            prices_dir,
            output,
            order,
            verbose,
        } => {
            let prices_dir = prices_dir.unwrap_or_else(|| config.prices_dir.clone());
            let output = output.unwrap_or_else(|| config.output_path.clone());
            let order = order.unwrap_or(config.input_order);
            run_backtests(&config, &prices_dir, &output, order, verbose)
        }
        Command::Synthetic {
            scenario,
            days,
            seed,
            output,
        } => write_synthetic(scenario, days, seed, &output),
    }
}

fn setup_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_backtests(
    config: &AppConfig,
    prices_dir: &Path,
    output: &Path,
    order: InputOrder,
    verbose: bool,
) -> anyhow::Result<()> {
    let files = discover_price_files(prices_dir)
        .with_context(|| format!("failed to list price files in {}", prices_dir.display()))?;
    tracing::info!("Found {} price files in {}", files.len(), prices_dir.display());

    let strategies: Vec<_> = StrategyKind::ALL
        .iter()
        .map(|&kind| strategy_for(kind, config.bands))
        .collect();
    let runner = BacktestRunner::new();
    let mut book = ResultsBook::new();

    for (ticker, path) in &files {
        let lines = match load_price_file(path, order) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", ticker, e);
                continue;
            }
        };

        for strategy in &strategies {
            match runner.run(strategy.as_ref(), &lines, ticker) {
                Ok(run) => {
                    if verbose {
                        run.print_report(strategy.name());
                    }
                    book.insert(ticker, strategy.kind(), run.result);
                }
                Err(e) => {
                    tracing::warn!("{} failed for {}: {}", strategy.name(), ticker, e);
                }
            }
        }

        if let Some(best) = book.best_for(ticker) {
            tracing::info!("{}: most profitable strategy is {}", ticker, best.display_name());
        }
    }

    if book.is_empty() {
        tracing::warn!("No results produced");
    }

    book.write_to(output)
        .with_context(|| format!("failed to write results to {}", output.display()))?;
    Ok(())
}

fn write_synthetic(
    scenario: MarketScenario,
    days: usize,
    seed: u64,
    output: &Path,
) -> anyhow::Result<()> {
    let closes = SyntheticSeriesGenerator::new(seed).generate(scenario, days);
    // Newest first, the way the quote provider stores history
    let mut lines = to_price_lines(&closes);
    lines.reverse();
    let mut contents = lines.join("\n");
    contents.push('\n');

    std::fs::write(output, contents)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if let (Some(first), Some(last)) = (closes.first(), closes.last()) {
        tracing::info!(
            "Wrote {} {:?} closes to {} ({} {} -> {} {})",
            closes.len(),
            scenario,
            output.display(),
            first.date,
            first.close,
            last.date,
            last.close
        );
    }
    Ok(())
}
