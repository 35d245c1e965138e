use std::error::Error;
use std::io;
use std::io::Write as _;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;
use uuid::Uuid;

use crate::api::client::ApiClient;
use crate::auth::{AuthError, FileTokenStore, SessionHolder, StoreError, TokenStore};
use crate::cfg;
use crate::core;
use crate::tenant::{TenantResolver, resolve_tenant_key};

#[rustfmt::skip]
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigLoadingFailed(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClientInitFailed(#[from] reqwest::Error),

    #[error("API request failed: {0}")]
    ApiCallFailed(#[from] crate::api::client::ApiError),

    #[error("Authentication failed: {0}")]
    AuthFailed(#[from] AuthError),

    #[error("Token storage failed: {0}")]
    TokenStoreFailed(#[from] StoreError),

    #[error("Invalid URL: {0}")]
    UrlParsingFailed(#[from] url::ParseError),

    #[error("Terminal input failed: {0}")]
    TerminalInputFailed(#[from] io::Error),
}

#[derive(Parser)]
#[command(name = "sawadee")]
#[command(about = "Terminal client for the SawadeeAI hotel platform", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tenant resolution and configuration
    Tenant {
        #[command(subcommand)]
        action: TenantCommand,
    },
    /// Log in and print the decoded identity
    Login {
        /// Username to log in with; the password is prompted
        username: String,
    },
    /// Clear the stored session
    Logout,
    /// Print the identity decoded from the stored token
    Whoami,
    /// Show hotel information for the active tenant
    HotelInfo {
        /// Tenant key to scope the request with
        #[arg(short, long)]
        tenant: Option<String>,
    },
    /// Send one message to the guest assistant
    Chat {
        message: String,
        /// Tenant key to scope the request with
        #[arg(short, long)]
        tenant: Option<String>,
    },
}

#[derive(Subcommand)]
enum TenantCommand {
    /// Resolve a tenant key from a URL, without any network call
    Resolve { url: String },
    /// Fetch and activate the tenant configuration for a key or URL
    Show {
        #[arg(long, conflicts_with = "url")]
        key: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// List all tenants
    List,
}

pub async fn run() {
    if let Err(e) = run_app().await {
        eprintln!("❌ {e}\n");

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("Caused by: {err}");
            source = err.source();
        }

        std::process::exit(1);
    }
}

async fn run_app() -> Result<(), AppError> {
    let cli = Cli::parse();

    let settings = cfg::ClientSettings::new()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&settings.log_directives))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(settings.auth.token_file.clone().into()));
    let ctx = core::Context::new(settings, tokens)?;
    let api = Arc::new(
        ApiClient::new(ctx)
            .with_offline_fallback(true)
            .with_unauthorized_hook(|| {
                tracing::warn!("The backend rejected the session, please log in again");
            }),
    );
    let session = SessionHolder::new(Arc::clone(&api));
    session.bootstrap().await?;

    match cli.command {
        Command::Tenant { action } => run_tenant(&api, action).await,
        Command::Login { username } => run_login(&session, &username).await,
        Command::Logout => {
            session.logout().await?;
            println!("Logged out.");
            Ok(())
        }
        Command::Whoami => {
            match session.current_user().await {
                Some(user) => print_identity(&user),
                None => println!("Not logged in."),
            }
            Ok(())
        }
        Command::HotelInfo { tenant } => run_hotel_info(&api, tenant).await,
        Command::Chat { message, tenant } => run_chat(&api, &message, tenant).await,
    }
}

async fn run_tenant(api: &Arc<ApiClient>, action: TenantCommand) -> Result<(), AppError> {
    let resolver = TenantResolver::new(Arc::clone(api));
    match action {
        TenantCommand::Resolve { url } => {
            let url = parse_url(&url)?;
            match resolve_tenant_key(&url) {
                Some(key) => println!("{key}"),
                None => println!("(no tenant)"),
            }
        }
        TenantCommand::Show { key, url } => {
            let config = if let Some(url) = url {
                resolver.activate_from_url(&parse_url(&url)?).await
            } else {
                resolver.activate(key.as_deref()).await
            };
            println!("Tenant:    {} ({})", config.name, config.tenant_key);
            println!("Domain:    {}", config.domain);
            println!("Colors:    {} / {}", config.primary_color, config.secondary_color);
            if let Some(logo) = &config.logo {
                println!("Logo:      {logo}");
            }
            println!("Active:    {}", config.active);
        }
        TenantCommand::List => {
            let tenants = api.tenants().await?;
            if tenants.is_placeholder() {
                println!("(backend unreachable, no tenants to show)");
            }
            for tenant in &tenants.value {
                println!("{:<16} {:<28} {}", tenant.tenant_key, tenant.name, tenant.domain);
            }
        }
    }
    Ok(())
}

async fn run_login(session: &SessionHolder, username: &str) -> Result<(), AppError> {
    print!("Password for '{username}': ");
    io::stdout().flush()?;
    let password = rpassword::read_password()?;

    let user = session.login(username, &password).await?;
    print_identity(&user);
    Ok(())
}

async fn run_hotel_info(api: &Arc<ApiClient>, tenant: Option<String>) -> Result<(), AppError> {
    if let Some(key) = tenant {
        api.tenant().set(Some(key)).await;
    }
    let info = api.hotel_info().await?;
    match &info.value {
        Some(hotel) => {
            println!("{}", hotel.name);
            println!("{}", hotel.address);
            println!("{} | {}", hotel.phone, hotel.email);
            println!("Reception hours: {}", hotel.operating_hours.reception);
            println!("Check-in {} / check-out {}", hotel.policies.check_in, hotel.policies.check_out);
            if !hotel.amenities.is_empty() {
                println!("Amenities: {}", hotel.amenities.join(", "));
            }
        }
        None => println!("No hotel information available."),
    }
    Ok(())
}

async fn run_chat(api: &Arc<ApiClient>, message: &str, tenant: Option<String>) -> Result<(), AppError> {
    if let Some(key) = tenant {
        api.tenant().set(Some(key)).await;
    }
    let session_id = Uuid::new_v4().to_string();
    let reply = api.chat_send(message, &session_id, None).await?;
    println!("{}", reply.value.message.content);
    if reply.is_placeholder() {
        println!("(offline placeholder reply)");
    }
    if let Some(suggestions) = &reply.value.suggestions {
        for suggestion in suggestions {
            println!("  • {suggestion}");
        }
    }
    Ok(())
}

fn print_identity(user: &crate::auth::UserIdentity) {
    println!("Logged in as {} <{}>", user.username, user.email);
    if !user.first_name.is_empty() || !user.last_name.is_empty() {
        println!("Name:  {} {}", user.first_name, user.last_name);
    }
    println!("Roles: {}", user.roles.join(", "));
}

/// Accepts bare hostnames as a convenience, e.g. `acme.example.com/checkin`.
fn parse_url(raw: &str) -> Result<Url, url::ParseError> {
    Url::parse(raw).or_else(|e| {
        if matches!(e, url::ParseError::RelativeUrlWithoutBase) {
            Url::parse(&format!("https://{raw}"))
        } else {
            Err(e)
        }
    })
}
