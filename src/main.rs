use std::io::{BufRead, Write};
use std::net::IpAddr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use health_risk::api::server;
use health_risk::client::RiskClient;
use health_risk::config::{self, ClientConfig, ServerConfig};
use health_risk::confirmation::{render_result, summary};
use health_risk::family::FamilySelection;
use health_risk::session::{RiskSession, ScoringMode, SessionError};
use health_risk::validation::RiskForm;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scoring API
    Serve {
        /// Address to bind (default: RISK_BIND_ADDR or 127.0.0.1)
        #[arg(long)]
        bind: Option<IpAddr>,
        /// Port to listen on (default: RISK_PORT or 3000)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Score one person, confirming the details before showing the result
    Score {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: String,
        #[arg(long)]
        feet: String,
        #[arg(long)]
        inches: String,
        /// Weight in pounds
        #[arg(long)]
        pounds: String,
        /// Blood pressure as systolic/diastolic, e.g. 120/80
        #[arg(long = "bp")]
        blood_pressure: String,
        /// Family history: diabetes, cancer, alzheimers, none, or free text (repeatable)
        #[arg(long)]
        family: Vec<String>,
        /// Delegate scoring to the server instead of computing locally
        #[arg(long)]
        remote: bool,
        /// Server base URL (default: RISK_API_BASE)
        #[arg(long)]
        api_base: Option<String>,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Check that a scoring server is up
    Ping {
        #[arg(long)]
        api_base: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    health_risk::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, port } => {
            let mut config = ServerConfig::from_env()?;
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            if let Some(port) = port {
                config.port = port;
            }
            tracing::info!("{} v{} starting", config::APP_NAME, config::APP_VERSION);
            server::serve(&config).await?;
        }
        Commands::Score {
            name,
            age,
            feet,
            inches,
            pounds,
            blood_pressure,
            family,
            remote,
            api_base,
            yes,
        } => {
            let mode = if remote {
                ScoringMode::Remote(client(api_base)?)
            } else {
                ScoringMode::Local
            };
            let form = RiskForm {
                name,
                age,
                feet,
                inches,
                pounds,
                blood_pressure,
                family: family_field(&family),
            };
            run_score(mode, &form, yes).await?;
        }
        Commands::Ping { api_base } => {
            let client = client(api_base)?;
            match client.ping().await {
                Ok(status) => println!("ok: {} (uptime {}s)", status.now, status.uptime_seconds),
                Err(e) => bail!("server not reachable: {e}"),
            }
        }
    }

    Ok(())
}

fn client(api_base: Option<String>) -> Result<RiskClient> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base) = api_base {
        config.api_base = base;
    }
    RiskClient::new(&config).context("building HTTP client")
}

/// Known tags go through the checkbox rules; anything else is kept as free text.
fn family_field(values: &[String]) -> String {
    let joined = values.join(",");
    let (selection, unknown) = FamilySelection::parse(&joined);
    if unknown.is_empty() {
        selection.to_field()
    } else {
        joined
    }
}

async fn run_score(mode: ScoringMode, form: &RiskForm, yes: bool) -> Result<()> {
    let mut session = RiskSession::new(mode);

    let pending = match session.evaluate(form).await {
        Ok(assessment) => assessment.clone(),
        Err(SessionError::Invalid(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("{}: {message}", field.key());
            }
            bail!("{} field(s) need attention", errors.len());
        }
        Err(SessionError::Unreachable(base)) => {
            bail!("Network error contacting server at {base}")
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", summary(&pending));

    if !yes && !prompt_yes_no()? {
        session.reject()?;
        println!("Cancelled.");
        return Ok(());
    }

    let confirmed = session.confirm()?;
    println!("\n{}", render_result(confirmed));
    Ok(())
}

fn prompt_yes_no() -> Result<bool> {
    print!("[y/N] ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
