use clap::{Parser, Subcommand};
use megagen_crm::AppError;
use megagen_session::Role;

mod cli;

/// megagen-crm - sales pipeline and field operations
#[derive(Parser)]
#[command(name = "megagen-crm")]
#[command(about = "Sessions, quotes and field visits for the MegaGen CRM", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the health-check HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Sign in against the API
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// View the CRM as another user (admin only)
    Impersonate {
        email: String,
        /// Role of the impersonated user, repeatable
        #[arg(long = "role", required = true)]
        roles: Vec<Role>,
        /// Token to use while impersonating
        #[arg(long)]
        token: Option<String>,
    },
    /// Go back to the real user after impersonating
    ExitImpersonation,
    /// Show the dashboard matching the user's roles
    Dashboard,
    /// List clients
    Clients,
    /// Manage quotes
    Quotes {
        #[command(subcommand)]
        command: cli::quote::QuoteCommands,
    },
    /// Terrain visits
    Visits {
        #[command(subcommand)]
        command: cli::field::VisitCommands,
    },
    /// Schedule a meeting
    Meeting {
        #[arg(long)]
        title: String,
        #[arg(long)]
        client: String,
        /// RFC 3339 start time
        #[arg(long)]
        at: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Show the local calendar and unread notifications
    Calendar,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<AppError>() {
            Some(app_error) => eprintln!("{}", app_error.user_message()),
            None => eprintln!("{e:#}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = megagen_crm::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    megagen_crm::observability::init_observability(
        "megagen-crm",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Login { email, password } => cli::session::login(&config, email, password).await,
        Commands::Logout => cli::session::logout(&config),
        Commands::Whoami => cli::session::whoami(&config),
        Commands::Impersonate {
            email,
            roles,
            token,
        } => cli::session::impersonate(&config, email, roles, token),
        Commands::ExitImpersonation => cli::session::exit_impersonation(&config),
        Commands::Dashboard => cli::field::dashboard(&config).await,
        Commands::Clients => cli::field::clients(&config).await,
        Commands::Quotes { command } => cli::quote::run(&config, command).await,
        Commands::Visits { command } => cli::field::visits(&config, command).await,
        Commands::Meeting {
            title,
            client,
            at,
            notes,
        } => cli::field::meeting(&config, title, client, at, notes).await,
        Commands::Calendar => cli::field::calendar(&config),
    }
}
