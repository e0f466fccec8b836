use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::str::FromStr;

const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;
const DEFAULT_MAX_OBJECT_SIZE: u64 = 5 * 1024 * 1024 * 1024;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage_dir: String,
    pub chunk_size: usize,
    pub max_object_size: u64,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Object storage service over a local filesystem")]
pub struct Args {
    /// Host to bind to (overrides BUCKETD_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides BUCKETD_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory where objects are stored (overrides BUCKETD_STORAGE_DIR)
    #[arg(long)]
    pub storage_dir: Option<String>,

    /// Streaming chunk size in bytes (overrides BUCKETD_CHUNK_SIZE)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Maximum object size in bytes (overrides BUCKETD_MAX_OBJECT_SIZE)
    #[arg(long)]
    pub max_object_size: Option<u64>,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig.
    pub fn from_env_and_args() -> Result<Self> {
        let args = Args::parse();

        let env_host = env::var("BUCKETD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_storage =
            env::var("BUCKETD_STORAGE_DIR").unwrap_or_else(|_| "./data/objects".into());
        let env_port = numeric_env("BUCKETD_PORT", 3000)?;
        let env_chunk = numeric_env("BUCKETD_CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?;
        let env_max = numeric_env("BUCKETD_MAX_OBJECT_SIZE", DEFAULT_MAX_OBJECT_SIZE)?;

        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            storage_dir: args.storage_dir.unwrap_or(env_storage),
            chunk_size: args.chunk_size.unwrap_or(env_chunk),
            max_object_size: args.max_object_size.unwrap_or(env_max),
        };

        Ok(cfg)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read a numeric environment variable, falling back to `default` when the
/// variable is absent.
fn numeric_env<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .with_context(|| format!("parsing {} value `{}`", name, value)),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(err) => Err(err).with_context(|| format!("reading {}", name)),
    }
}
