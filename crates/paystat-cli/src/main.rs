mod report;

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use paystat_client::ReqwestFetcher;
use paystat_core::config::{DEFAULT_TIMEOUT, parse_list};
use paystat_core::{
    FailurePolicy, HeadHunter, Settings, StatisticsBuilder, SuperJob, VacancySource,
};

use crate::report::ProviderReport;

#[derive(Parser)]
#[command(
    name = "paystat",
    version,
    about = "Average developer salaries per programming language from HeadHunter and SuperJob"
)]
struct Cli {
    /// Comma-separated search terms (defaults to twelve popular languages)
    #[arg(short, long, env = "PAYSTAT_TERMS")]
    terms: Option<String>,

    /// Which providers to query
    #[arg(short, long, value_enum, default_value_t = ProviderChoice::All)]
    provider: ProviderChoice,

    /// Output format written to stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Comma-separated job-title keywords every search is narrowed to
    #[arg(long, env = "PAYSTAT_KEYWORDS")]
    keywords: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "PAYSTAT_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Record a failing term and continue instead of aborting the provider run
    #[arg(long, default_value_t = false)]
    isolate_failures: bool,

    /// Region name shown in report titles
    #[arg(long, default_value = "Moscow")]
    region_label: String,

    /// HeadHunter vacancies endpoint
    #[arg(long, env = "HH_BASE_URL")]
    hh_base_url: Option<String>,

    /// Minimum reported vacancies for a term to appear in the HeadHunter report
    #[arg(long)]
    hh_min_found: Option<u64>,

    /// HeadHunter area (region) id
    #[arg(long)]
    hh_area: Option<u32>,

    /// Only HeadHunter vacancies published within this many days
    #[arg(long)]
    hh_period_days: Option<u32>,

    /// HeadHunter industry id
    #[arg(long)]
    hh_industry: Option<u32>,

    /// HeadHunter professional role id
    #[arg(long)]
    hh_professional_role: Option<u32>,

    /// SuperJob vacancies endpoint
    #[arg(long, env = "SJ_BASE_URL")]
    sj_base_url: Option<String>,

    /// SuperJob application secret
    #[arg(long, env = "API_KEY_SUPERJOB", hide_env_values = true)]
    sj_token: Option<String>,

    /// SuperJob vacancies per page (1-100)
    #[arg(long)]
    sj_page_size: Option<u32>,

    /// SuperJob town name
    #[arg(long)]
    sj_town: Option<String>,

    /// SuperJob catalogue id
    #[arg(long)]
    sj_catalogue: Option<u32>,

    /// Only SuperJob vacancies published within this many days
    #[arg(long)]
    sj_period_days: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderChoice {
    All,
    Headhunter,
    Superjob,
}

impl ProviderChoice {
    fn headhunter(self) -> bool {
        matches!(self, ProviderChoice::All | ProviderChoice::Headhunter)
    }

    fn superjob(self) -> bool {
        matches!(self, ProviderChoice::All | ProviderChoice::Superjob)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl Cli {
    /// Overlay command-line values on the default settings and validate them.
    ///
    /// Provider sections are only validated for the selected providers.
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings {
            timeout: Duration::from_secs(self.timeout_secs),
            failure_policy: if self.isolate_failures {
                FailurePolicy::Isolate
            } else {
                FailurePolicy::Abort
            },
            region_label: self.region_label.clone(),
            ..Settings::default()
        };

        if let Some(raw) = &self.terms {
            settings.search_terms = parse_list(raw);
        }
        if let Some(raw) = &self.keywords {
            settings = settings.with_profession_keywords(parse_list(raw));
        }

        let hh = &mut settings.headhunter;
        if let Some(url) = &self.hh_base_url {
            hh.base_url = url.clone();
        }
        if let Some(min_found) = self.hh_min_found {
            hh.min_found = min_found;
        }
        if let Some(area) = self.hh_area {
            hh.area = area;
        }
        if let Some(days) = self.hh_period_days {
            hh.period_days = days;
        }
        if let Some(industry) = self.hh_industry {
            hh.industry = industry;
        }
        if let Some(role) = self.hh_professional_role {
            hh.professional_role = role;
        }

        let sj = &mut settings.superjob;
        if let Some(url) = &self.sj_base_url {
            sj.base_url = url.clone();
        }
        sj.api_key = self.sj_token.clone();
        if let Some(page_size) = self.sj_page_size {
            sj.page_size = page_size;
        }
        if let Some(town) = &self.sj_town {
            sj.town = town.clone();
        }
        if let Some(catalogue) = self.sj_catalogue {
            sj.catalogue = catalogue;
        }
        if self.sj_period_days.is_some() {
            sj.period_days = self.sj_period_days;
        }

        settings.validate().context("Invalid configuration")?;
        if self.provider.headhunter() {
            settings
                .headhunter
                .validate()
                .context("Invalid HeadHunter configuration")?;
        }
        if self.provider.superjob() {
            settings
                .superjob
                .validate()
                .context("Invalid SuperJob configuration")?;
        }
        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("paystat=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli.settings()?;

    run(cli.provider, cli.format, &settings, &mut std::io::stdout().lock()).await
}

/// Query the selected providers in order and write their reports to `out`.
///
/// If a provider fails, the reports of the providers that already finished
/// are still written before the error is returned.
async fn run<W: Write>(
    providers: ProviderChoice,
    format: OutputFormat,
    settings: &Settings,
    out: &mut W,
) -> Result<()> {
    let fetcher =
        ReqwestFetcher::with_timeout(settings.timeout).context("Failed to create HTTP client")?;
    let builder = StatisticsBuilder::with_policy(settings.failure_policy);
    tracing::info!(
        terms = settings.search_terms.len(),
        policy = ?settings.failure_policy,
        timeout_secs = settings.timeout.as_secs(),
        "Starting run"
    );

    // Build every source before the first query so a missing token fails fast.
    let headhunter = providers
        .headhunter()
        .then(|| HeadHunter::new(fetcher.clone(), settings.headhunter.clone()));
    let superjob = if providers.superjob() {
        Some(SuperJob::new(fetcher.clone(), settings.superjob.clone())?)
    } else {
        None
    };

    let mut reports = Vec::new();
    let outcome = async {
        if let Some(source) = &headhunter {
            reports.push(collect(&builder, source, settings, format, &mut *out).await?);
        }
        if let Some(source) = &superjob {
            reports.push(collect(&builder, source, settings, format, &mut *out).await?);
        }
        anyhow::Ok(())
    }
    .await;

    if outcome.is_ok() || !reports.is_empty() {
        match format {
            OutputFormat::Table => {}
            OutputFormat::Json => report::write_json(&mut *out, &reports, chrono::Utc::now())?,
            OutputFormat::Csv => report::write_csv(&mut *out, &reports)?,
        }
    }

    outcome
}

/// Build one provider's statistics. Tables are printed as soon as they are ready.
async fn collect<S: VacancySource, W: Write>(
    builder: &StatisticsBuilder,
    source: &S,
    settings: &Settings,
    format: OutputFormat,
    out: &mut W,
) -> Result<ProviderReport> {
    let table = builder
        .build(source, settings.search_terms.as_slice())
        .await
        .with_context(|| format!("{} statistics failed", source.name()))?;

    let report = ProviderReport::new(source.name(), &settings.region_label, table);
    if format == OutputFormat::Table {
        report::write_table(out, &report)?;
    }
    Ok(report)
}
