use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use spending_insights_engine::engine::{GroupReport, GroupRule, SortField, SortOrder, ALL_CATEGORIES};
use spending_insights_engine::models::{ImportSummary, TransactionRecord};
use spending_insights_engine::session::{DashboardSession, Overview};
use spending_insights_engine::storage::{SnapshotLoader, SnapshotStorage};
use spending_insights_engine::types::{format_currency, format_signed, YearMonth};

#[derive(Debug, Parser)]
#[command(name = "spending-insights-engine", about = "Summarize and browse a transaction snapshot")]
struct Cli {
    /// Transaction snapshot (id,booked_at,amount,description,purpose,merchant,iban,category,category_color)
    transactions: PathBuf,
    /// Category list (name,color)
    #[arg(long)]
    categories: Option<PathBuf>,
    /// Month to report on as YYYY-MM (default: current month)
    #[arg(long, conflicts_with = "all_time")]
    month: Option<YearMonth>,
    /// Report on every record instead of a single month
    #[arg(long)]
    all_time: bool,
    /// Case-insensitive search over description, purpose, merchant and IBAN
    #[arg(long, default_value = "")]
    search: String,
    /// Category to list, or "All"
    #[arg(long, default_value = ALL_CATEGORIES)]
    category: String,
    /// Sort field: date, amount, merchant or description
    #[arg(long)]
    sort: Option<SortField>,
    /// Flip the sort direction
    #[arg(long)]
    reverse: bool,
    /// Grouped sub-report as Label=field:pattern (repeatable)
    #[arg(long = "group")]
    groups: Vec<GroupRule>,
    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "error")]
    log_level: String
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let storage = Arc::new(SnapshotStorage::new());
    let loader = SnapshotLoader::new(storage.clone());

    let timer = Instant::now();
    if let Some(path) = &cli.categories {
        loader.load_categories(path).await?;
    }
    let import = loader.load_transactions(&cli.transactions).await?;
    let duration = timer.elapsed();

    info!("Loaded snapshot in: {duration:?} ({import})");

    let today = Local::now().date_naive();
    let mut session = DashboardSession::new(storage, today);

    if let Some(month) = cli.month {
        session.go_to_month(month);
    }
    if cli.all_time {
        session.toggle_all_time();
    }

    let mut sort = cli.sort.map(SortOrder::by).unwrap_or_default();
    if cli.reverse {
        sort.direction = sort.direction.flipped();
    }

    session.set_search(cli.search);
    session.set_category(cli.category.as_str());
    session.set_sort(sort);

    let overview = session.overview(today).await?;
    let reports = session.group_reports(&cli.groups).await?;
    let visible = session.visible_transactions().await?;

    write_results_to_stdout(&import, &overview, &reports, &visible)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The report goes to stdout, logging stays on stderr so the two can be redirected separately
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results_to_stdout(
    import: &ImportSummary,
    overview: &Overview,
    reports: &[GroupReport],
    visible: &[TransactionRecord]
) -> Result<()> {
    let mut output = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(BufWriter::new(stdout().lock()));

    let summary = &overview.summary;

    output.write_record(["period", overview.label.as_str()])?;
    output.write_record(["imported", import.to_string().as_str()])?;
    output.write_record(["total_income", format_currency(summary.total_income).as_str()])?;
    output.write_record(["total_out", format_currency(summary.total_out).as_str()])?;
    output.write_record(["burn_rate", format_currency(summary.burn_rate).as_str()])?;
    output.write_record(["unassigned", summary.unassigned_count.to_string().as_str()])?;

    output.write_record(["category", "spent", "bar_percent"])?;
    for spend in &overview.breakdown {
        output.write_record([spend.name.clone(), format_currency(spend.amount), spend.bar_percent.to_string()])?;
    }

    output.write_record(["group", "total", "count", "average"])?;
    for report in reports {
        output.write_record([
            report.label.clone(),
            format_currency(report.total),
            report.count.to_string(),
            format_currency(report.average)
        ])?;
    }

    output.write_record(["booked_at", "description", "merchant", "category", "amount"])?;
    for record in visible {
        output.write_record([
            record.booked_at.to_string(),
            record.description().to_string(),
            record.merchant().to_string(),
            record.category_name().to_string(),
            format_signed(record.amount)
        ])?;
    }

    let mut inner = output.into_inner().map_err(|error| anyhow::anyhow!("Could not flush report: {error}"))?;
    inner.flush()?;

    Ok(())
}
