// command line interface

use crate::core::{Ai, Classifier, Diagnoser, SymptomReport};
use crate::output::Output;
use crate::{Provider, Server};
use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "healthwise", about = "Health insights from your symptoms")]
struct Cli {
    /// ai provider (gemini, claude)
    #[arg(
        long,
        short = 'p',
        env = "HEALTHWISE_PROVIDER",
        default_value = "gemini",
        global = true
    )]
    provider: Provider,

    /// api key for the ai provider
    #[arg(long, short = 'k', global = true)]
    api_key: Option<String>,

    /// model name, defaults to the provider's usual one
    #[arg(long, short = 'm', env = "HEALTHWISE_MODEL", global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// start as http server
    Serve {
        /// port number
        #[arg(long, short, env = "PORT", default_value = "5000")]
        port: u16,

        /// host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// only allow this origin (with credentials) instead of any
        #[arg(long, env = "FRONTEND_URL")]
        frontend_url: Option<String>,
    },

    /// get insights for one set of symptoms and exit
    Diagnose {
        /// what you are experiencing
        #[arg(long, short)]
        symptoms: String,

        /// relevant conditions, allergies, or medications
        #[arg(long)]
        history: Option<String>,

        /// print raw json instead of cards
        #[arg(long)]
        json: bool,
    },

    /// check whether text would be accepted, without calling the ai
    Check {
        /// text to classify
        text: String,
    },
}

pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve {
            port,
            host,
            frontend_url,
        }) => {
            init_tracing();
            let diagnoser = diagnoser(cli.provider, cli.api_key, cli.model)?;
            Ok(Server::run(diagnoser, &host, port, frontend_url.as_deref()).await?)
        }

        Some(Commands::Diagnose {
            symptoms,
            history,
            json,
        }) => {
            init_tracing();
            let diagnoser = diagnoser(cli.provider, cli.api_key, cli.model)?;
            let report = SymptomReport::new(symptoms, history);

            let result = diagnoser
                .diagnose(&report)
                .await
                .map_err(|e| miette::miette!("{}", e.detail()))?;

            if json {
                Output::raw(&result);
            } else {
                Output::pretty(&result);
            }
            Ok(())
        }

        Some(Commands::Check { text }) => {
            init_tracing();
            let classifier = Classifier::medical()?;
            Output::verdict(&classifier.classify(&text));
            Ok(())
        }

        // no subcommand: interactive mode, the tui asks for a key if it has none
        None => Ok(crate::tui::run(cli.provider, cli.api_key, cli.model).await?),
    }
}

fn diagnoser(
    provider: Provider,
    api_key: Option<String>,
    model: Option<String>,
) -> Result<Diagnoser<Ai>> {
    let ai = Ai::new(provider, api_key, model)?;
    tracing::info!(provider = provider.name(), model = ai.model(), "ai provider ready");
    Ok(Diagnoser::new(Classifier::medical()?, ai))
}

// logs go to stderr so `diagnose --json` stays pipeable
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("healthwise=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
