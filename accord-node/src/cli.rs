use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "accord-node")]
#[command(about = "Replicated ledger node with majority-hash agreement")]
pub struct Args {
    /// Port the HTTP surface listens on
    #[arg(long)]
    pub port: Option<u16>,

    /// Peer endpoint, repeatable (e.g. http://127.0.0.1:3001)
    #[arg(long = "peer", value_name = "URL")]
    pub peers: Vec<String>,

    /// Per-peer request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub peer_timeout_secs: Option<u64>,

    /// JSON config file; explicit flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,
}
