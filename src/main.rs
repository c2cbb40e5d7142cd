//! Check-in Admin CLI
//!
//! Command-line front-end for the check-in administration API:
//! - Show or watch the dashboard
//! - Deactivate a user, or check out everyone
//! - Download the weekly report
//! - Register an account
//! - Manage the stored session token

use checkin_admin::config::generate_default_config;
use checkin_admin::{
    weekly_report_filename, AdminApi, AdminClient, ApiError, Config, DashboardPoller,
    DashboardState, ErrorContext, FileTokenStore, RefreshKind, RefreshOutcome, RegisterForm,
    TokenStore,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "checkin-admin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Administrative front-end for the visitor check-in system")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Admin API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show registered/active/inactive counts and the active users
    Dashboard,

    /// Show the dashboard and refresh it periodically
    Watch {
        /// Refresh period in seconds (default: from config)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Deactivate a single user
    Deactivate {
        /// User identifier
        user_id: String,
    },

    /// Deactivate all active users and end the session
    Checkout,

    /// Download the weekly report spreadsheet
    Report {
        /// Output file (default: weekly-report_<week>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Register a new account
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long, default_value = "")]
        middle_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        username: String,
        /// Password (or CHECKIN_PASSWORD)
        #[arg(long, env = "CHECKIN_PASSWORD", hide_env_values = true)]
        password: String,
        /// Password confirmation (or CHECKIN_CONFIRM_PASSWORD)
        #[arg(long, env = "CHECKIN_CONFIRM_PASSWORD", hide_env_values = true)]
        confirm_password: String,
    },

    /// Manage the stored session token
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TokenAction {
    /// Store a session token
    Set { token: String },
    /// Print whether a token is stored
    Show,
    /// Delete the stored token
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    config.logging.init()?;

    tracing::debug!("Admin API: {}", config.api.base_url);

    let tokens: Arc<dyn TokenStore> =
        Arc::new(FileTokenStore::new(config.session.token_path()));

    match cli.command {
        Commands::Dashboard => {
            let api: Arc<dyn AdminApi> =
                Arc::new(AdminClient::new(config.api.clone(), Arc::clone(&tokens))?);
            let poller = DashboardPoller::new(api, tokens, config.session.refresh_interval());

            let outcome = poller.refresh(RefreshKind::Initial).await;
            let state = poller.state();
            let state = state.read().await;
            render_dashboard(&state, cli.format);

            if outcome != RefreshOutcome::Updated {
                std::process::exit(1);
            }
        }

        Commands::Watch { interval } => {
            let api: Arc<dyn AdminApi> =
                Arc::new(AdminClient::new(config.api.clone(), Arc::clone(&tokens))?);
            let interval = interval
                .map(|s| std::time::Duration::from_secs(s.max(1)))
                .unwrap_or_else(|| config.session.refresh_interval());
            let poller = Arc::new(DashboardPoller::new(api, tokens, interval));

            let format = cli.format;
            let mut handle = poller.spawn(move |state, outcome| {
                render_dashboard(state, format);
                if outcome == RefreshOutcome::SessionExpired {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });

            tokio::select! {
                _ = handle.join() => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                }
            }
            handle.stop();
        }

        Commands::Deactivate { user_id } => {
            let client = AdminClient::new(config.api.clone(), tokens)?;
            match client.deactivate_user(&user_id).await {
                Ok(ack) => println!("{}", message_or(&ack.msg, &format!("Deactivated {}", user_id))),
                Err(e) => fail(&e, ErrorContext::Deactivate),
            }
        }

        Commands::Checkout => {
            let client = AdminClient::new(config.api.clone(), Arc::clone(&tokens))?;
            match client.deactivate_all_active_users().await {
                Ok(ack) => {
                    let mut state = DashboardState::new();
                    state.checkout(tokens.as_ref())?;
                    println!("{}", message_or(&ack.msg, "All active users checked out"));
                    println!("Session ended.");
                }
                Err(e) => fail(&e, ErrorContext::Checkout),
            }
        }

        Commands::Report { output } => {
            let client = AdminClient::new(config.api.clone(), tokens)?;
            match client.weekly_report().await {
                Ok(bytes) => {
                    let path = output.unwrap_or_else(|| {
                        PathBuf::from(weekly_report_filename(chrono::Local::now().date_naive()))
                    });
                    std::fs::write(&path, &bytes)?;
                    println!("Saved weekly report to {} ({} bytes)", path.display(), bytes.len());
                }
                Err(e) => fail(&e, ErrorContext::Report),
            }
        }

        Commands::Register {
            first_name,
            middle_name,
            last_name,
            username,
            password,
            confirm_password,
        } => {
            let form = RegisterForm {
                first_name,
                middle_name,
                last_name,
                username,
                password,
                confirm_password,
            };

            let request = match form.validate() {
                Ok(request) => request,
                Err(errors) => {
                    eprintln!("{}", errors);
                    std::process::exit(1);
                }
            };

            let client = AdminClient::new(config.api.clone(), tokens)?;
            match client.register(&request).await {
                Ok(ack) => println!("{}", message_or(&ack.msg, "Registered")),
                Err(e) => fail(&e, ErrorContext::Register),
            }
        }

        Commands::Token { action } => match action {
            TokenAction::Set { token } => {
                tokens.set(&token)?;
                println!("Session token stored in {:?}", config.session.token_path());
            }
            TokenAction::Show => match tokens.get() {
                Some(_) => println!("A session token is stored in {:?}", config.session.token_path()),
                None => println!("No session token stored"),
            },
            TokenAction::Clear => {
                tokens.clear()?;
                println!("Session token removed");
            }
        },

        Commands::Config { output } => {
            let content = generate_default_config();
            if let Some(path) = output {
                std::fs::write(&path, content)?;
                println!("Config written to {}", path.display());
            } else {
                print!("{}", content);
            }
        }
    }

    Ok(())
}

fn message_or<'a>(msg: &'a str, fallback: &'a str) -> &'a str {
    if msg.trim().is_empty() {
        fallback
    } else {
        msg
    }
}

fn fail(error: &ApiError, context: ErrorContext) -> ! {
    for line in error.banner(context) {
        eprintln!("{}", line);
    }
    std::process::exit(1);
}

fn render_dashboard(state: &DashboardState, format: OutputFormat) {
    if format == OutputFormat::Json {
        let counts = state.counts();
        let value = serde_json::json!({
            "user": state.user,
            "registered": counts.registered,
            "active": counts.active,
            "inactive": counts.inactive,
            "activeUsers": state.active_users,
            "error": state.error,
            "notice": state.notice,
        });
        println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
        return;
    }

    if let Some(error) = &state.error {
        eprintln!("{}", error);
        return;
    }
    if let Some(notice) = &state.notice {
        eprintln!("{}", notice);
        eprintln!("Check in again with: checkin-admin token set <TOKEN>");
        return;
    }

    if let Some(user) = &state.user {
        println!("Welcome, {}", user.first_name);
        println!();
    }

    let counts = state.counts();
    println!(
        "{} Registered | {} Active | {} Inactive",
        counts.registered, counts.active, counts.inactive
    );
    println!();

    if state.active_users.is_empty() {
        println!("No active users are available.");
        return;
    }

    println!("{:<24} | {:<40} | {:<20} | {}", "Name", "Check-in time", "Purpose", "ID");
    println!("{}", "-".repeat(110));
    for user in &state.active_users {
        println!(
            "{:<24} | {:<40} | {:<20} | {}",
            user.display_name(),
            checkin_admin::format_check_in_time(user.check_in_time),
            user.purpose_or_empty(),
            user.id
        );
    }
}
