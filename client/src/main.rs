//! Startup Planner - command-line client
//!
//! Drives the same orchestrators as the browser front end against the
//! planner API, persisting the selected business and preferences locally.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use shared::ui::{BusinessFormValues, OverviewFigures};
use shared::{
    ContactMessage, KeyValueStore, Language, LoginData, MemoryStore, Notification, Preferences,
    RegisterData, SelectionStore, Stage, Theme, ValidationFailure,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use startup_planner_client::api::HttpApi;
use startup_planner_client::services::{
    CompetitorResearch, Dashboard, LoadStatus, SessionService,
};
use startup_planner_client::{AppError, AppResult, Config, FileStore};

#[derive(Parser)]
#[command(name = "planner", version, about = "Startup Planner command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List businesses and show which one is selected
    List,
    /// Select a business by id
    Select { id: i64 },
    /// Create a business
    Create(BusinessFields),
    /// Update a business; omitted fields keep their values
    Update {
        id: i64,
        #[command(flatten)]
        fields: BusinessFields,
    },
    /// Delete a business and all its data
    Delete {
        id: i64,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Competitor research for the selected business
    Competitors {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Run a new research pass first
        #[arg(long)]
        generate: bool,
        /// Remove every stored competitor
        #[arg(long, conflicts_with = "generate")]
        clear: bool,
    },
    /// Show or change theme and language
    Preferences {
        #[arg(long, value_parser = parse_theme)]
        theme: Option<Theme>,
        #[arg(long, value_parser = parse_language)]
        language: Option<Language>,
    },
    /// Sign in and print the session cookies to configure
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        display_name: String,
    },
    /// Send a message to the planner team
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// End the session and forget the selected business
    Logout,
}

#[derive(Args)]
struct BusinessFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    industry: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    long_description: Option<String>,
    #[arg(long, value_parser = parse_stage)]
    stage: Option<Stage>,
    #[arg(long)]
    stage_description: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    funding_amount: Option<Decimal>,
    #[arg(long, allow_hyphen_values = true)]
    team_size: Option<i64>,
    /// YYYY-MM-DD
    #[arg(long)]
    founding_date: Option<String>,
}

impl BusinessFields {
    fn apply(self, values: &mut BusinessFormValues) {
        if let Some(v) = self.name {
            values.name = v;
        }
        if let Some(v) = self.industry {
            values.industry = v;
        }
        if let Some(v) = self.description {
            values.description = v;
        }
        if let Some(v) = self.long_description {
            values.long_description = v;
        }
        if let Some(v) = self.stage {
            values.stage = v;
        }
        if let Some(v) = self.stage_description {
            values.stage_description = v;
        }
        if let Some(v) = self.funding_amount {
            values.funding_amount = v;
        }
        if let Some(v) = self.team_size {
            values.team_size = v;
        }
        if let Some(v) = self.founding_date {
            values.founding_date = v;
        }
    }
}

fn parse_stage(s: &str) -> Result<Stage, String> {
    Stage::from_str(s).ok_or_else(|| format!("unknown stage '{}' (Idea, MVP, Growth, Maturity)", s))
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::from_str(s).ok_or_else(|| format!("unknown theme '{}' (light, dark)", s))
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::from_code(s).ok_or_else(|| format!("unknown language '{}' (en, es, fr)", s))
}

/// File storage when a path is known, otherwise memory for this run only
fn open_store(config: &Config) -> Box<dyn KeyValueStore> {
    match config.storage.resolved_path() {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using file storage");
            Box::new(FileStore::new(path))
        }
        None => {
            tracing::warn!("No data directory available; selections will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

/// Print per-field messages before failing
fn invalid(failure: ValidationFailure) -> AppError {
    for (field, message) in failure.0.iter() {
        eprintln!("{}: {}", field, message);
    }
    AppError::Validation(failure)
}

fn report(note: Notification) -> AppResult<()> {
    if note.is_failure() {
        return Err(note.into());
    }
    println!("{}", note);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "startup_planner_client=info,planner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();
    run(cli.command).await.context("planner command failed")
}

async fn run(command: Command) -> AppResult<()> {
    // Load configuration
    let config = Config::load()?;
    tracing::debug!("Environment: {}", config.environment);

    let api = HttpApi::new(&config.api, &config.session)?;

    match command {
        Command::List => {
            let mut dashboard = Dashboard::new(api, open_store(&config));
            dashboard.load().await;
            if let LoadStatus::Error(message) = dashboard.status() {
                return Err(AppError::Rejected(Notification::failure("Error", message.clone())));
            }
            let selected = dashboard.selected().map(|b| b.id);
            if dashboard.businesses().is_empty() {
                println!("No businesses");
            }
            for business in dashboard.businesses() {
                let marker = if Some(business.id) == selected { "*" } else { " " };
                println!("{} {:>4}  {}  ({}, {})", marker, business.id, business.name, business.industry, business.stage);
            }
            if let Some(business) = dashboard.selected() {
                let figures = OverviewFigures::of(business);
                println!();
                println!("Funding {}  Team {}  Progress {}%", figures.funding, figures.team_size, figures.stage_percent);
            }
        }
        Command::Select { id } => {
            let mut dashboard = Dashboard::new(api, open_store(&config));
            dashboard.load().await;
            if !dashboard.select(id) {
                return Err(AppError::no_business(id));
            }
            println!("Selected {}", dashboard.selected_label());
        }
        Command::Create(fields) => {
            let mut dashboard = Dashboard::new(api, open_store(&config));
            dashboard.load().await;
            dashboard.create_new();
            fields.apply(dashboard.form_mut().values_mut());
            submit(&mut dashboard).await?;
        }
        Command::Update { id, fields } => {
            let mut dashboard = Dashboard::new(api, open_store(&config));
            dashboard.load().await;
            if !dashboard.select(id) || !dashboard.edit_selected() {
                return Err(AppError::no_business(id));
            }
            fields.apply(dashboard.form_mut().values_mut());
            submit(&mut dashboard).await?;
        }
        Command::Delete { id, yes } => {
            let mut dashboard = Dashboard::new(api, open_store(&config));
            dashboard.load().await;
            if !dashboard.select(id) || !dashboard.request_delete() {
                return Err(AppError::no_business(id));
            }
            if !yes {
                if let Some(prompt) = dashboard.delete_prompt() {
                    println!("{} {}", prompt.title, prompt.description);
                }
                println!("Re-run with --yes to delete.");
                dashboard.cancel_delete();
                return Ok(());
            }
            if let Some(note) = dashboard.confirm_delete().await {
                report(note)?;
            }
        }
        Command::Competitors { page, generate, clear } => {
            let selection = SelectionStore::open(open_store(&config));
            let Some(business) = selection.selected().cloned() else {
                return Err(AppError::InvalidInput(
                    "No business selected. Run `planner select <id>` first.".to_string(),
                ));
            };
            let mut research = CompetitorResearch::new(api, business);
            if generate {
                report(research.generate().await)?;
            }
            if clear {
                return report(research.clear().await);
            }
            if let Some(note) = research.load_page(page).await {
                report(note)?;
            }
            println!("Competitors for {} (page {} of {})", research.business().name, research.page(), research.total_pages());
            for competitor in research.competitors() {
                let (filled, empty) = competitor.review_stars();
                println!(
                    "{:>4}  {}  {}% share  {}{}  {}",
                    competitor.id,
                    competitor.name,
                    competitor.market_share,
                    "*".repeat(filled as usize),
                    ".".repeat(empty as usize),
                    competitor.growth_trend,
                );
            }
        }
        Command::Preferences { theme, language } => {
            let mut preferences = Preferences::open(open_store(&config));
            if let Some(theme) = theme {
                preferences.set_theme(theme);
            }
            if let Some(language) = language {
                preferences.set_language(language);
            }
            println!("Theme: {}", preferences.theme().as_str());
            println!("Language: {}", preferences.language().label());
        }
        Command::Login { email, password } => {
            let service = SessionService::new(api);
            let outcome = service.login(LoginData { email, password }).await.map_err(invalid)?;
            report(outcome.notification)?;
            if let Some(tokens) = outcome.tokens {
                if let Some(id) = tokens.session_id {
                    println!("PLANNER_SESSION__SESSION_ID={}", id);
                }
                if let Some(token) = tokens.csrf_token {
                    println!("PLANNER_SESSION__CSRF_TOKEN={}", token);
                }
            }
        }
        Command::Register { email, password, display_name } => {
            let service = SessionService::new(api);
            let form = RegisterData {
                email,
                confirm_password: password.clone(),
                password,
                display_name,
            };
            report(service.register(form).await.map_err(invalid)?)?;
        }
        Command::Contact { name, email, message } => {
            let service = SessionService::new(api);
            let form = ContactMessage { name, email, message };
            report(service.contact(form).await.map_err(invalid)?)?;
        }
        Command::Logout => {
            let service = SessionService::new(api);
            let mut selection = SelectionStore::open(open_store(&config));
            report(service.logout(&mut selection).await)?;
        }
    }

    Ok(())
}

async fn submit<S: KeyValueStore>(dashboard: &mut Dashboard<HttpApi, S>) -> AppResult<()> {
    match dashboard.submit_form().await {
        Some(note) => report(note),
        None => Err(invalid(ValidationFailure(dashboard.form().errors().clone()))),
    }
}
