//! TrendCast CLI: forecast, symbol listing, and config commands.
//!
//! Commands:
//! - `forecast`: fetch history, fit a linear trend, print the forecast
//! - `symbols`: list the allowed symbols
//! - `config init`: write a default config file
//! - `config show`: print the effective config

mod render;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use trendcast_core::config::ProviderKind;
use trendcast_core::data::build_provider;
use trendcast_core::domain::DATE_FORMAT;
use trendcast_core::{run_forecast, AppConfig, DateStep, ForecastRequest, PipelineSettings};

const SPARKLINE_WIDTH: usize = 60;

#[derive(Parser)]
#[command(
    name = "trendcast",
    about = "TrendCast CLI: linear-trend stock price forecasts"
)]
struct Cli {
    /// Config file. Defaults to <config_dir>/trendcast/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast closing prices for one symbol.
    Forecast {
        /// Symbol from the allow-list (e.g., AAPL).
        #[arg(long)]
        symbol: String,

        /// Start date (YYYY-MM-DD). Defaults to one lookback period ago.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD, exclusive). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Number of future points. Defaults to the configured horizon.
        #[arg(long)]
        horizon: Option<usize>,

        /// Date step for forecast dates: calendar_day or weekday.
        #[arg(long)]
        step: Option<String>,

        /// Read closes from <DIR>/<SYMBOL>.csv instead of Yahoo Finance.
        #[arg(long)]
        csv_dir: Option<PathBuf>,

        /// Write the combined series to this CSV file.
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print the full report as JSON instead of tables.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the symbols that may be forecast.
    Symbols,
    /// Config file commands.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config file.
    Init {
        /// Destination. Defaults to the standard config location.
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the effective config as TOML.
    Show,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Forecast {
            symbol,
            start,
            end,
            horizon,
            step,
            csv_dir,
            export,
            json,
        } => {
            let config = AppConfig::load(cli.config.as_deref())?;
            let args = ForecastArgs {
                symbol,
                start,
                end,
                horizon,
                step,
                csv_dir,
                export,
                json,
            };
            run_forecast_cmd(config, args)
        }
        Commands::Symbols => {
            let config = AppConfig::load(cli.config.as_deref())?;
            for symbol in config.symbols.iter() {
                println!("{symbol}");
            }
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { path, force } => run_config_init(path.or(cli.config), force),
            ConfigAction::Show => {
                let config = AppConfig::load(cli.config.as_deref())?;
                print!("{}", config.to_toml()?);
                Ok(())
            }
        },
    }
}

/// Logs go to stderr so stdout stays clean for tables and JSON.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct ForecastArgs {
    symbol: String,
    start: Option<String>,
    end: Option<String>,
    horizon: Option<usize>,
    step: Option<String>,
    csv_dir: Option<PathBuf>,
    export: Option<PathBuf>,
    json: bool,
}

fn run_forecast_cmd(mut config: AppConfig, args: ForecastArgs) -> Result<()> {
    // Flags override the file.
    if let Some(dir) = args.csv_dir {
        config.provider.kind = ProviderKind::Csv;
        config.provider.csv_dir = dir;
    }
    if let Some(step) = args.step.as_deref() {
        config.forecast.date_step = step.parse::<DateStep>().map_err(|e| anyhow!(e))?;
    }

    let today = chrono::Local::now().date_naive();
    let (default_start, default_end) = config.forecast.default_range(today)?;
    let start = parse_date(args.start.as_deref(), "--start")?.unwrap_or(default_start);
    let end = parse_date(args.end.as_deref(), "--end")?.unwrap_or(default_end);
    let horizon = args.horizon.unwrap_or(config.forecast.default_horizon);

    let provider = build_provider(&config.provider)?;
    let settings = PipelineSettings::from(&config);
    let request = ForecastRequest::new(args.symbol, start, end, horizon);

    let report = run_forecast(&request, provider.as_ref(), &settings)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        print!("{}", render::format_summary(&report));
        println!();
        print!("{}", render::format_table(report.table_rows()));
        println!();
        println!(
            "{}",
            render::sparkline(&report.combined.closes(), SPARKLINE_WIDTH)
        );
    }

    if let Some(path) = args.export {
        let file = std::fs::File::create(&path)
            .with_context(|| format!("create {}", path.display()))?;
        render::write_csv(&report.combined, file)?;
        tracing::info!(path = %path.display(), rows = report.combined.len(), "exported");
    }

    Ok(())
}

fn parse_date(value: Option<&str>, flag: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .with_context(|| format!("{flag}: expected YYYY-MM-DD, got '{s}'"))
        })
        .transpose()
}

fn run_config_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => AppConfig::default_path()
            .ok_or_else(|| anyhow!("no config directory on this platform; pass --path"))?,
    };
    write_default_config(&path, force)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (pass --force to overwrite)", path.display());
    }
    AppConfig::default().save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_forecast_flags() {
        let cli = Cli::try_parse_from([
            "trendcast", "forecast", "--symbol", "aapl", "--start", "2024-01-01", "--horizon", "10",
            "--step", "weekday", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Forecast {
                symbol,
                start,
                horizon,
                step,
                json,
                ..
            } => {
                assert_eq!(symbol, "aapl");
                assert_eq!(start.as_deref(), Some("2024-01-01"));
                assert_eq!(horizon, Some(10));
                assert_eq!(step.as_deref(), Some("weekday"));
                assert!(json);
            }
            _ => panic!("expected forecast command"),
        }
    }

    #[test]
    fn cli_requires_symbol() {
        assert!(Cli::try_parse_from(["trendcast", "forecast"]).is_err());
    }

    #[test]
    fn parse_date_reports_flag() {
        assert_eq!(parse_date(None, "--start").unwrap(), None);
        assert_eq!(
            parse_date(Some("2024-02-29"), "--start").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        let err = parse_date(Some("02/29/2024"), "--end").unwrap_err();
        assert!(err.to_string().contains("--end"));
    }

    #[test]
    fn config_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_default_config(&path, false).unwrap();
        assert!(write_default_config(&path, false).is_err());
        write_default_config(&path, true).unwrap();
        assert_eq!(AppConfig::from_file(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn forecast_from_csv_dir_exports() {
        let dir = tempfile::tempdir().unwrap();
        let mut csv = String::from("date,close\n");
        for d in 1..=9 {
            csv.push_str(&format!("2024-01-0{d},{}\n", 100 + d));
        }
        std::fs::write(dir.path().join("AAPL.csv"), csv).unwrap();
        let export = dir.path().join("out.csv");

        let args = ForecastArgs {
            symbol: "AAPL".into(),
            start: Some("2024-01-01".into()),
            end: Some("2024-02-01".into()),
            horizon: Some(4),
            step: None,
            csv_dir: Some(dir.path().to_path_buf()),
            export: Some(export.clone()),
            json: true,
        };
        run_forecast_cmd(AppConfig::default(), args).unwrap();

        let text = std::fs::read_to_string(export).unwrap();
        assert_eq!(text.lines().count(), 1 + 9 + 4);
        assert!(text.lines().last().unwrap().starts_with("2024-01-13,"));
    }

    #[test]
    fn forecast_rejects_bad_step() {
        let args = ForecastArgs {
            symbol: "AAPL".into(),
            start: None,
            end: None,
            horizon: None,
            step: Some("hourly".into()),
            csv_dir: None,
            export: None,
            json: false,
        };
        let err = run_forecast_cmd(AppConfig::default(), args).unwrap_err();
        assert!(err.to_string().contains("unknown date step"));
    }
}
