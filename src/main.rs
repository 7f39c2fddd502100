use clap::Parser;
use deployer_scout::blockchain::{BlockchainClient, EtherscanClient};
use deployer_scout::utils::config::{DEFAULT_ETHERSCAN_API_URL, DEFAULT_RPC_URL};
use deployer_scout::{utils, ContractDiscovery, ScannerConfig, WalletAnalyzer};
use std::sync::Arc;

/// Discover the contracts a wallet deployed and label their quality
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Deployer address to analyze
    #[arg(value_name = "ADDRESS")]
    address: String,

    /// JSON-RPC endpoint
    #[arg(short, long, env = "BASE_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc: String,

    /// Etherscan API key (enables the indexed lookup and verification checks)
    #[arg(long, env = "ETHERSCAN_API_KEY")]
    etherscan_key: Option<String>,

    /// Etherscan v2 endpoint
    #[arg(long, env = "ETHERSCAN_API_URL", default_value = DEFAULT_ETHERSCAN_API_URL)]
    etherscan_url: String,

    /// Print the analysis as JSON
    #[arg(long)]
    json: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Setup logging
    let default_filter = if args.verbose { "deployer_scout=debug" } else { "deployer_scout=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Reject bad input before touching the network
    if let Err(e) = utils::parse_address(&args.address) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let mut config = ScannerConfig::from_env()
        .with_rpc_url(args.rpc)
        .with_etherscan_key(args.etherscan_key);
    config.etherscan_api_url = args.etherscan_url;

    if config.etherscan_api_key.is_none() {
        tracing::warn!("ETHERSCAN_API_KEY not set: using direct block scan, all contracts unverified");
    }

    let client = Arc::new(BlockchainClient::new(&config.rpc_url).await?);
    tracing::info!("Connected to {}", client.chain_name());
    if client.chain_id() != config.chain_id {
        tracing::warn!(
            "RPC reports chain {} but the explorer is queried for chain {}",
            client.chain_id(),
            config.chain_id
        );
    }

    let etherscan = Arc::new(EtherscanClient::new(&config)?);

    let discovery = ContractDiscovery::with_default_strategies(
        &config,
        client,
        etherscan.clone(),
        etherscan,
    );

    tracing::info!("Discovery order: {}", discovery.strategy_names().join(" -> "));

    let analyzer = WalletAnalyzer::new(discovery);
    let analysis = analyzer.analyze(&args.address).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{}", analysis);
    }

    Ok(())
}
