//! rusty-fxhistory CLI - Command-line interface for historical rate tables
//!
//! Looks up CNB exchange rates by date and exports yearly tables.
//!
//! ## Example Usage
//!
//! ```bash
//! # Rate of EUR in CZK on a given date
//! rusty-fxhistory rate EUR/CZK --date 2015-01-30
//!
//! # Fall back up to a week for weekends and holidays
//! rusty-fxhistory rate USD/CZK --date 2015-01-03 --fallback-days 7
//!
//! # Columns published in a year
//! rusty-fxhistory currencies 2015
//!
//! # Export a normalized year as CSV from local files
//! rusty-fxhistory --dir ./tables export 2014 --format csv -o rates-2014.csv
//! ```

use chrono::{Datelike, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use rusty_fxhistory::currency::{CurrencyCode, CurrencyPair};
use rusty_fxhistory::error::FxHistoryError;
use rusty_fxhistory::provider::{HistoryProvider, QuoteCurrencyGuard};
use rusty_fxhistory::source::{ContentSource, DirectorySource, HttpSource, UrlTemplate};
use rusty_fxhistory::table::{RateTable, TableFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// rusty-fxhistory: Historical central bank exchange rates
#[derive(Parser)]
#[command(name = "rusty-fxhistory")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Robert Fall")]
#[command(about = "Historical central bank exchange rates", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Read yearly files from this directory instead of downloading them
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the rate of a currency pair
    Rate {
        /// Currency pair, e.g. EUR/CZK
        #[arg(value_name = "PAIR")]
        pair: String,

        /// Date (YYYY-MM-DD), defaults to today in Prague
        #[arg(short = 'D', long)]
        date: Option<String>,

        /// Walk back up to N days when the date has no published rates
        #[arg(short = 'f', long)]
        fallback_days: Option<u32>,
    },

    /// List currency columns of a year's table
    Currencies {
        #[arg(value_name = "YEAR")]
        year: i32,
    },

    /// Export a year's normalized rates
    Export {
        #[arg(value_name = "YEAR")]
        year: i32,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file (stdout when omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Show configuration and build information
    Info,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Config {
    #[serde(default = "default_quote_currency")]
    quote_currency: String,
    #[serde(default)]
    url_template: Option<String>,
    #[serde(default)]
    data_dir: Option<PathBuf>,
    #[serde(default = "default_file_prefix")]
    file_prefix: String,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
    #[serde(default)]
    fallback_days: u32,
}

fn default_quote_currency() -> String {
    CurrencyCode::CZK.to_string()
}

fn default_file_prefix() -> String {
    DirectorySource::DEFAULT_PREFIX.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quote_currency: default_quote_currency(),
            url_template: None,
            data_dir: None,
            file_prefix: default_file_prefix(),
            timeout_secs: default_timeout_secs(),
            fallback_days: 0,
        }
    }
}

impl Config {
    fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => dirs::home_dir().map(|home| home.join(".rusty-fxhistory").join("config.toml")),
        };

        if let Some(config_path) = path {
            if config_path.exists() {
                match fs::read_to_string(&config_path) {
                    Ok(contents) => match toml::from_str(&contents) {
                        Ok(config) => return config,
                        Err(e) => {
                            eprintln!("{} Failed to parse config: {}", "Warning:".yellow(), e);
                        }
                    },
                    Err(e) => {
                        eprintln!("{} Failed to read config: {}", "Warning:".yellow(), e);
                    }
                }
            }
        }

        Config::default()
    }

    fn source(&self, dir_override: Option<&Path>) -> CliResult<Box<dyn ContentSource>> {
        if let Some(dir) = dir_override.or(self.data_dir.as_deref()) {
            return Ok(Box::new(DirectorySource::with_prefix(dir, self.file_prefix.clone())));
        }

        let template = self
            .url_template
            .as_ref()
            .map(UrlTemplate::new)
            .unwrap_or_default();
        Ok(Box::new(HttpSource::with_template(
            template,
            Duration::from_secs(self.timeout_secs),
        )?))
    }

    fn guard(&self) -> CliResult<QuoteCurrencyGuard> {
        let quote = CurrencyCode::new(self.quote_currency.as_str())
            .map_err(|e| FxHistoryError::ConfigError(e.to_string()))?;
        Ok(QuoteCurrencyGuard::new(quote))
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::load(cli.config.as_deref());

    if cli.verbose {
        println!(
            "{} v{}",
            "rusty-fxhistory".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
    }

    let result = build_provider(&config, cli.dir.as_deref())
        .and_then(|provider| run_command(cli.command, &provider, &config));

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn build_provider(
    config: &Config,
    dir: Option<&Path>,
) -> CliResult<HistoryProvider<Box<dyn ContentSource>>> {
    Ok(HistoryProvider::with_settings(
        config.source(dir)?,
        config.guard()?,
        TableFormat::cnb(),
    ))
}

fn run_command(
    command: Commands,
    provider: &HistoryProvider<Box<dyn ContentSource>>,
    config: &Config,
) -> CliResult<()> {
    match command {
        Commands::Rate {
            pair,
            date,
            fallback_days,
        } => show_rate(provider, &pair, date, fallback_days.unwrap_or(config.fallback_days)),
        Commands::Currencies { year } => show_currencies(provider, year),
        Commands::Export {
            year,
            format,
            output,
        } => export_year(provider, year, format, output),
        Commands::Info => show_info(provider, config),
    }
}

fn today_in_prague() -> NaiveDate {
    Utc::now().with_timezone(&chrono_tz::Europe::Prague).date_naive()
}

fn load_table(
    provider: &HistoryProvider<Box<dyn ContentSource>>,
    year: i32,
) -> CliResult<Arc<RateTable>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Loading {} table from {}", year, provider.source().describe()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let table = provider.table_for_year(year);
    spinner.finish_and_clear();
    Ok(table?)
}

fn show_rate(
    provider: &HistoryProvider<Box<dyn ContentSource>>,
    pair: &str,
    date: Option<String>,
    fallback_days: u32,
) -> CliResult<()> {
    let pair = CurrencyPair::from_string(pair)?;
    let date = match date {
        Some(text) => NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .map_err(|e| format!("Invalid date '{}': {}", text, e))?,
        None => today_in_prague(),
    };

    // Fail on the pair before anything is downloaded
    provider.guard().check(&pair)?;
    load_table(provider, date.year())?;

    match provider.fetch_rate_or_previous(&pair, date, fallback_days) {
        Ok(rate) => {
            print!("{} {}: {}", pair.to_string().bold(), date, rate.to_string().green().bold());
            if rate.date != date {
                print!(" {}", format!("(published {})", rate.date).dimmed());
            }
            println!();
            Ok(())
        }
        Err(e @ FxHistoryError::DateNotAvailable { .. }) => {
            Err(format!("{} (weekend or holiday? try --fallback-days)", e).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn show_currencies(provider: &HistoryProvider<Box<dyn ContentSource>>, year: i32) -> CliResult<()> {
    let table = load_table(provider, year)?;

    println!("{}", format!("Currencies published in {}", year).bold());
    println!("{}", "==========================".dimmed());
    for (block, header) in table.headers().iter().enumerate() {
        if table.headers().len() > 1 {
            println!("{}", format!("Header block {}", block + 1).cyan());
        }
        for column in header.iter() {
            println!(
                "  {:<4} {:>5} {}",
                column.currency_code.to_string().bold(),
                column.unit_base,
                format!("(column {})", column.column_index).dimmed()
            );
        }
    }
    println!();
    println!("  {} {}", "Publication dates:".bold(), table.len());
    Ok(())
}

#[derive(Serialize)]
struct ExportRow<'a> {
    date: NaiveDate,
    currency: &'a str,
    value: Decimal,
}

fn export_rows(table: &RateTable) -> Vec<ExportRow<'_>> {
    let mut rows = Vec::with_capacity(table.num_entries());
    for date in table.dates() {
        if let Some(rates) = table.rates_on(date) {
            let mut day: Vec<ExportRow<'_>> = rates
                .iter()
                .map(|(code, entry)| ExportRow {
                    date,
                    currency: code.as_str(),
                    value: entry.value,
                })
                .collect();
            day.sort_by(|a, b| a.currency.cmp(b.currency));
            rows.extend(day);
        }
    }
    rows
}

fn export_year(
    provider: &HistoryProvider<Box<dyn ContentSource>>,
    year: i32,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let table = load_table(provider, year)?;
    let rows = export_rows(&table);

    let writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(fs::File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for row in &rows {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
        }
        ExportFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, &rows)?;
            writeln!(writer)?;
        }
    }

    if let Some(path) = output {
        eprintln!(
            "{} {} rates written to {}",
            "Done:".green().bold(),
            rows.len(),
            path.display()
        );
    }
    Ok(())
}

fn feature_status(enabled: bool) -> colored::ColoredString {
    if enabled {
        "enabled".green()
    } else {
        "disabled".dimmed()
    }
}

fn show_info(provider: &HistoryProvider<Box<dyn ContentSource>>, config: &Config) -> CliResult<()> {
    println!(
        "{} {}",
        "rusty-fxhistory".cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();

    println!("{}", "Configuration".bold());
    println!("{}", "=============".dimmed());
    println!("  {} {}", "Quote currency:".bold(), config.quote_currency);
    println!("  {} {}", "Source:".bold(), provider.source().describe());
    println!("  {} {}s", "HTTP timeout:".bold(), config.timeout_secs);
    println!("  {} {}", "Fallback days:".bold(), config.fallback_days);
    println!("  {} {}", "Today (Prague):".bold(), today_in_prague());
    println!();

    println!("{}", "Features".bold());
    println!("{}", "========".dimmed());
    println!("  {} {}", "HTTP source:".bold(), feature_status(cfg!(feature = "http")));
    println!("  {} {}", "CLI tools:".bold(), feature_status(cfg!(feature = "cli")));
    println!();
    Ok(())
}
