use clap::{Parser, Subcommand};
use dotenv::dotenv;
use warp_sdk::sdk::config::WarpConfig;
use warp_sdk::warp::client::WarpClient;
use warp_sdk::warp::job::JobLoader;
use warp_sdk::warp::resolver::Resolver;
use warp_sdk::warp::server;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config file; defaults to WARP_* environment variables
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the condition of a local job definition
    Eval {
        /// Path to the job file (YAML or JSON)
        #[arg(short, long)]
        file: String,
    },
    /// Resolve the external inputs of a local job definition
    Inputs {
        /// Path to the job file (YAML or JSON)
        #[arg(short, long)]
        file: String,
    },
    /// Check whether an on-chain job's condition currently holds
    Job {
        /// Job id
        #[arg(short, long)]
        id: u64,

        /// Also ask the resolver contract and compare verdicts
        #[arg(long)]
        parity: bool,
    },
    /// Serve condition resolution over HTTP
    Serve {
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => WarpConfig::load(path)?,
        None => WarpConfig::from_env()?,
    };
    log::info!("Using LCD {} ({})", config.lcd_url, config.chain_id);

    match args.command {
        Commands::Eval { file } => {
            let job = JobLoader::new().load_job(&file)?;
            let resolver = Resolver::from_config(&config)?;
            let active = resolver.resolve_condition(&job.condition, &job.vars).await?;
            println!("{}: {}", job.name, active);
        }
        Commands::Inputs { file } => {
            let job = JobLoader::new().load_job(&file)?;
            let resolver = Resolver::from_config(&config)?;
            let inputs = resolver.resolve_external_inputs(&job.vars).await;
            println!("{}", serde_json::to_string_pretty(&inputs)?);
        }
        Commands::Job { id, parity } => {
            let client = WarpClient::from_config(&config)?;
            let active = client.is_job_active(id).await?;
            println!("Job {} active: {}", id, active);

            if parity {
                let job = client.job(id).await?;
                let on_chain = client
                    .resolve_condition_on_chain(&job.condition()?, &job.vars()?)
                    .await?;
                if on_chain != active {
                    log::warn!(
                        "Job {}: off-chain verdict {} differs from resolver verdict {}",
                        id,
                        active,
                        on_chain
                    );
                }
                println!("Job {} resolver verdict: {}", id, on_chain);
            }
        }
        Commands::Serve { port } => {
            let resolver = Resolver::from_config(&config)?;
            server::serve(resolver, port).await?;
        }
    }

    Ok(())
}
