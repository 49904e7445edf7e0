// Campus portal CLI
//
// Design Decision: Use clap derive for ergonomic argument parsing.
// Design Decision: Support text/json/yaml output formats for scripting.
// Design Decision: Every command goes through the route guard before calling the API.
// Design Decision: Logs go to stderr so stdout stays pipeable.

mod commands;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use campus_portal_core::{
    AuthError, AuthManager, DurableStorage, FileStorage, GatewayError, HttpGateway, MemoryStorage,
    PortalConfig, PortalError, Router, SessionContext, SessionStore,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::App;

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Campus portal CLI - Sign in and work with student, faculty and admin dashboards")]
#[command(version)]
pub struct Cli {
    /// API base URL
    #[arg(long, env = "PORTAL_API_URL")]
    pub api_url: Option<String>,

    /// File holding the persisted session
    #[arg(long, env = "PORTAL_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Keep the session in memory only for this invocation
    #[arg(long)]
    pub ephemeral: bool,

    /// Output format
    #[arg(long, short, default_value = "text", value_parser = ["text", "json", "yaml"])]
    pub output: String,

    /// Suppress non-essential output
    #[arg(long, short)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        /// Account email
        #[arg(long, short)]
        email: String,

        /// Account password
        #[arg(long, short, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Change the password of the signed-in account
    Password {
        /// Current password
        #[arg(long)]
        current: String,

        /// New password
        #[arg(long)]
        new: String,
    },

    /// Register a new account
    Signup {
        /// Account email
        #[arg(long, short)]
        email: String,

        /// Account password
        #[arg(long, short)]
        password: String,

        /// Account role (STUDENT, FACULTY, ADMIN)
        #[arg(long, short, default_value = "STUDENT")]
        role: campus_portal_core::Role,
    },

    /// Navigate to a portal path and show where the guard sends you
    Open {
        /// Portal path, e.g. /student/results
        path: String,
    },

    /// Student dashboard
    Student {
        #[command(subcommand)]
        command: commands::student::StudentCommand,
    },

    /// Faculty dashboard
    Faculty {
        #[command(subcommand)]
        command: commands::faculty::FacultyCommand,
    },

    /// Admin dashboard
    Admin {
        #[command(subcommand)]
        command: commands::admin::AdminCommand,
    },

    /// Notice board
    Notices {
        #[command(subcommand)]
        command: commands::notices::NoticesCommand,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_app(cli: &Cli) -> anyhow::Result<App> {
    let mut config = PortalConfig::from_env();
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }
    if let Some(session_file) = &cli.session_file {
        config.session_file = session_file.clone();
    }
    config.validate()?;

    let storage: Arc<dyn DurableStorage> = if cli.ephemeral {
        Arc::new(MemoryStorage::new())
    } else {
        Arc::new(FileStorage::new(&config.session_file))
    };
    tracing::debug!(api_url = %config.api_url, ephemeral = cli.ephemeral, "starting portal client");

    let context = SessionContext::restore(SessionStore::new(storage));
    let router = Arc::new(Router::new());
    let gateway = Arc::new(HttpGateway::new(&config, context.clone(), router.clone())?);
    let auth = AuthManager::new(context.clone(), gateway.clone());

    Ok(App {
        context,
        router,
        gateway,
        auth,
        output: output::OutputFormat::from_str(&cli.output),
        quiet: cli.quiet,
    })
}

fn session_expired(err: &anyhow::Error) -> bool {
    if let Some(err) = err.downcast_ref::<PortalError>() {
        return err.is_session_expired();
    }
    if let Some(err) = err.downcast_ref::<AuthError>() {
        return err.is_session_expired();
    }
    err.downcast_ref::<GatewayError>()
        .is_some_and(GatewayError::is_unauthorized)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let app = build_app(&cli)?;

    let result = match cli.command {
        Commands::Login { email, password } => commands::auth::login(&app, &email, &password).await,
        Commands::Logout => commands::auth::logout(&app),
        Commands::Whoami => commands::auth::whoami(&app),
        Commands::Password { current, new } => {
            commands::auth::change_password(&app, &current, &new).await
        }
        Commands::Signup {
            email,
            password,
            role,
        } => commands::auth::signup(&app, &email, &password, role).await,
        Commands::Open { path } => commands::open::run(&app, &path),
        Commands::Student { command } => commands::student::run(command, &app).await,
        Commands::Faculty { command } => commands::faculty::run(command, &app).await,
        Commands::Admin { command } => commands::admin::run(command, &app).await,
        Commands::Notices { command } => commands::notices::run(command, &app).await,
    };

    if let Err(err) = &result {
        if session_expired(err) {
            eprintln!("Your session has expired. Run `portal login` to sign in again.");
        }
    }
    result
}
