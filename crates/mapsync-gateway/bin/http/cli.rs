use clap::Parser;
use mapsync_core::WritePolicy;
use mapsync_gateway::cors::DEFAULT_PRODUCTION_ORIGIN;
use mapsync_gateway::Deployment;
use mapsync_planner::{DEFAULT_MAX_ATTEMPTS, DEFAULT_SHARE_BASE};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "MAPSYNC_GATEWAY_LISTEN_ADDR";
pub const MYSQL_DSN_ENV: &str = "MAPSYNC_GATEWAY_MYSQL_DSN";
pub const IN_MEMORY_ENV: &str = "MAPSYNC_GATEWAY_IN_MEMORY";
pub const SHARE_BASE_ENV: &str = "MAPSYNC_GATEWAY_SHARE_BASE";
pub const WRITE_POLICY_ENV: &str = "MAPSYNC_GATEWAY_WRITE_POLICY";
pub const MAX_ATTEMPTS_ENV: &str = "MAPSYNC_GATEWAY_MAX_ATTEMPTS";
pub const DEPLOYMENT_ENV: &str = "MAPSYNC_GATEWAY_DEPLOYMENT";
pub const ALLOWED_ORIGIN_ENV: &str = "MAPSYNC_GATEWAY_ALLOWED_ORIGIN";
pub const IDENTITY_TOKENS_ENV: &str = "MAPSYNC_GATEWAY_IDENTITY_TOKENS";
pub const DEMO_LOGIN_ENV: &str = "MAPSYNC_GATEWAY_ENABLE_DEMO_LOGIN";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "mapsync-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// MySQL trip store. Without it (and without `--in-memory`) the store
    /// is treated as unavailable.
    #[arg(long, env = MYSQL_DSN_ENV, conflicts_with = "in_memory")]
    pub mysql_dsn: Option<String>,

    /// Keep trips in process memory.
    #[arg(long, env = IN_MEMORY_ENV)]
    pub in_memory: bool,

    #[arg(long, env = SHARE_BASE_ENV, default_value = DEFAULT_SHARE_BASE)]
    pub share_base: String,

    #[arg(long, env = WRITE_POLICY_ENV, default_value_t = WritePolicy::BestEffort)]
    pub write_policy: WritePolicy,

    #[arg(long, env = MAX_ATTEMPTS_ENV, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    #[arg(long, env = DEPLOYMENT_ENV, value_enum, default_value_t = Deployment::Local)]
    pub deployment: Deployment,

    /// Allowed CORS origin in production; repeatable.
    #[arg(
        long,
        env = ALLOWED_ORIGIN_ENV,
        value_delimiter = ',',
        default_value = DEFAULT_PRODUCTION_ORIGIN
    )]
    pub allowed_origin: Vec<String>,

    /// `token=user_id` pairs accepted by the development identity verifier.
    #[arg(long, env = IDENTITY_TOKENS_ENV, value_delimiter = ',', value_parser = parse_token_pair)]
    pub identity_token: Vec<(String, String)>,

    /// Accept the placeholder demo credentials on `/login`.
    #[arg(long, env = DEMO_LOGIN_ENV)]
    pub enable_demo_login: bool,
}

fn parse_token_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((token, user)) if !token.is_empty() && !user.is_empty() => {
            Ok((token.to_string(), user.to_string()))
        }
        _ => Err(format!("expected token=user_id, got '{raw}'")),
    }
}
