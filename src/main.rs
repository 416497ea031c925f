//! Command-line entry point for the muster roll service.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use muster_roll::aggregation::{
    AggregationMode, MusterRoll, PeriodCalendar, RowFilter, build_daily_summary,
};
use muster_roll::api::{AppState, create_router};
use muster_roll::config::ConfigLoader;
use muster_roll::models::{PeriodRequest, Shift, localize_records};
use muster_roll::report::{
    ExportFormat, ExportedFile, ReportContext, ReportScope, export_muster_roll, export_summary,
};
use muster_roll::source::{AttendanceQuery, AttendanceSource, HttpAttendanceSource, Session};

/// Environment variable holding the upstream bearer token.
const TOKEN_ENV: &str = "MUSTER_API_TOKEN";

#[derive(Parser)]
#[command(name = "muster-roll")]
#[command(about = "Attendance muster roll reports", long_about = None)]
struct Cli {
    /// Configuration directory
    #[arg(long, global = true, default_value = "./config/default")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: String,
    },
    /// Export a muster roll fetched from the upstream API
    Export {
        #[command(flatten)]
        period: PeriodArgs,
        #[command(flatten)]
        scope: ScopeArgs,
        /// Output format: xlsx, pdf or txt
        #[arg(long, default_value = "xlsx")]
        format: ExportFormat,
        /// Aggregation mode: sparse or dense
        #[arg(long, default_value = "sparse", value_parser = parse_mode)]
        mode: AggregationMode,
        /// Only rows whose name, designation or id contains this text
        #[arg(long)]
        search: Option<String>,
        /// Only rows on this shift
        #[arg(long)]
        shift: Option<Shift>,
        /// Write plain text if the document backend is unavailable
        #[arg(long)]
        fallback: bool,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Export the day-by-day shift summary
    Summary {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
        #[command(flatten)]
        scope: ScopeArgs,
        /// Output format: xlsx, pdf or txt
        #[arg(long, default_value = "xlsx")]
        format: ExportFormat,
        /// Write plain text if the document backend is unavailable
        #[arg(long)]
        fallback: bool,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Args)]
struct PeriodArgs {
    /// Calendar month, 1-12
    #[arg(long)]
    month: Option<u32>,
    /// Calendar year
    #[arg(long)]
    year: Option<i32>,
    /// Range start (YYYY-MM-DD); takes precedence over month/year
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Range end (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl From<PeriodArgs> for PeriodRequest {
    fn from(args: PeriodArgs) -> Self {
        PeriodRequest {
            from: args.from,
            to: args.to,
            month: args.month,
            year: args.year,
        }
    }
}

#[derive(Args)]
struct ScopeArgs {
    /// Restrict to one site
    #[arg(long)]
    site_id: Option<String>,
    /// Site display name used in headers and file names
    #[arg(long, requires = "site_id")]
    site_name: Option<String>,
    /// Name printed as "generated by"
    #[arg(long)]
    generated_by: Option<String>,
}

impl ScopeArgs {
    fn scope(&self) -> ReportScope {
        match &self.site_id {
            Some(id) => ReportScope::Site {
                id: id.clone(),
                name: self.site_name.clone().unwrap_or_else(|| id.clone()),
            },
            None => ReportScope::Global,
        }
    }
}

fn parse_mode(value: &str) -> Result<AggregationMode, String> {
    match value.trim().to_lowercase().as_str() {
        "sparse" => Ok(AggregationMode::Sparse),
        "dense" => Ok(AggregationMode::Dense),
        other => Err(format!("unknown mode '{}', expected sparse or dense", other)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let loader = ConfigLoader::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    match cli.command {
        Commands::Serve { bind } => serve(loader, &bind).await,
        Commands::Export {
            period,
            scope,
            format,
            mode,
            search,
            shift,
            fallback,
            out,
        } => {
            let session = session(scope.generated_by.clone());
            let source = HttpAttendanceSource::new(loader.source(), session)?;
            let calendar = PeriodCalendar::from_request(&period.into())?;
            let report_scope = scope.scope();

            let mut query = AttendanceQuery::between(calendar.first_date(), calendar.last_date());
            query.site_id = report_scope.site_id().map(str::to_string);
            let records = source.fetch_attendance(&query).await?;
            let records = localize_records(&records, &loader.report().timezone);
            let employees = source.fetch_employees(report_scope.site_id()).await?;

            let roll = MusterRoll::build(
                &records,
                &employees,
                calendar,
                mode,
                RowFilter { search, shift },
                &loader.report().time_format,
            );
            let context = ReportContext::new(loader.organization().name.as_str(), report_scope)
                .with_generated_by(scope.generated_by);
            let file = export_muster_roll(&roll, &context, loader.config(), format, fallback)?;
            write_export(&out, &file)
        }
        Commands::Summary {
            from,
            to,
            scope,
            format,
            fallback,
            out,
        } => {
            let session = session(scope.generated_by.clone());
            let source = HttpAttendanceSource::new(loader.source(), session)?;
            let report_scope = scope.scope();
            let summary = build_daily_summary(&source, from, to, report_scope.site_id()).await?;

            let context = ReportContext::new(loader.organization().name.as_str(), report_scope)
                .with_generated_by(scope.generated_by);
            let file = export_summary(&summary, &context, loader.config(), format, fallback)?;
            write_export(&out, &file)
        }
    }
}

async fn serve(loader: ConfigLoader, bind: &str) -> Result<()> {
    let source = HttpAttendanceSource::new(loader.source(), session(None))?;
    let state = AppState::new(loader, Arc::new(source));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding {}", bind))?;
    info!(address = %bind, "Muster roll API listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn session(user: Option<String>) -> Session {
    Session {
        token: std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty()),
        user,
    }
}

fn write_export(dir: &Path, file: &ExportedFile) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(&file.file_name);
    std::fs::write(&path, &file.bytes).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = file.bytes.len(), "Export written");
    println!("{}", path.display());
    Ok(())
}
