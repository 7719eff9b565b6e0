use alloy::primitives::Address;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "vault-tui", about = "Terminal front-end for the assessment vault contract")]
pub struct Config {
    /// RPC endpoint URL
    #[arg(short, long, default_value = "http://localhost:8545")]
    pub rpc_url: String,

    /// Address of the deployed vault contract
    #[arg(short, long, default_value = "0xd8b934580fcE35a11B58C6D73aDeE468a2833fa8")]
    pub contract: Address,

    /// Hex-encoded private key used to sign transactions.
    /// If omitted, accounts managed by the node (eth_accounts) sign instead.
    #[arg(long, env = "VAULT_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Tick rate in milliseconds for UI refresh
    #[arg(long, default_value = "100")]
    pub tick_rate_ms: u64,
}
