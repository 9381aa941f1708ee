use clap::{Args, Parser, ValueEnum};
use ipnetwork::IpNetwork;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub auth: AuthConfig,

    #[command(flatten)]
    pub contact: ContactConfig,

    #[command(flatten)]
    pub rate_limit: RateLimitConfig,

    #[command(flatten)]
    pub skills: SkillsConfig,

    #[command(flatten)]
    pub health: HealthConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[arg(long = "database-url", env = "PORTFOLIO_DATABASE_URL")]
    pub url: String,

    /// Maximum number of pooled connections
    #[arg(long = "db-max-connections", env = "PORTFOLIO_DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// Minimum number of idle connections kept open
    #[arg(long = "db-min-connections", env = "PORTFOLIO_DB_MIN_CONNECTIONS", default_value_t = 1)]
    pub min_connections: u32,

    /// How long to wait for a free connection before failing
    #[arg(long = "db-acquire-timeout-secs", env = "PORTFOLIO_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,

    /// Idle connections are closed after this many seconds
    #[arg(long = "db-idle-timeout-secs", env = "PORTFOLIO_DB_IDLE_TIMEOUT_SECS", default_value_t = 600)]
    pub idle_timeout_secs: u64,

    /// Connections are recycled after this many seconds
    #[arg(long = "db-max-lifetime-secs", env = "PORTFOLIO_DB_MAX_LIFETIME_SECS", default_value_t = 1800)]
    pub max_lifetime_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "PORTFOLIO_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the public API
    #[arg(long, env = "PORTFOLIO_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for liveness/readiness probes
    #[arg(long, env = "PORTFOLIO_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// Comma-separated list of CIDRs to trust for X-Forwarded-For IP extraction
    #[arg(
        long,
        env = "PORTFOLIO_TRUSTED_PROXIES",
        default_value = "10.0.0.0/8,172.16.0.0/12,192.168.0.0/16,127.0.0.1/32",
        value_delimiter = ','
    )]
    pub trusted_proxies: Vec<IpNetwork>,

    /// Upper bound on the time a single request may take before headers are sent
    #[arg(long, env = "PORTFOLIO_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// How long to wait for in-flight work during shutdown
    #[arg(long, env = "PORTFOLIO_SHUTDOWN_TIMEOUT_SECS", default_value_t = 10)]
    pub shutdown_timeout_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct AuthConfig {
    /// Secret shared with the identity provider for verifying session tokens
    #[arg(long, env = "PORTFOLIO_AUTH_SESSION_SECRET")]
    pub session_secret: String,

    /// Logins allowed into the admin dashboard. Empty means any signed-in login.
    #[arg(long, env = "PORTFOLIO_AUTH_ADMIN_LOGINS", value_delimiter = ',')]
    pub admin_logins: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ContactConfig {
    /// Minimum number of characters in a contact message
    #[arg(long, env = "PORTFOLIO_CONTACT_MESSAGE_MIN_LENGTH", default_value_t = 10)]
    pub message_min_length: usize,
}

#[derive(Clone, Debug, Args)]
pub struct RateLimitConfig {
    /// Requests per second allowed for standard endpoints
    #[arg(long = "rate-limit-per-second", env = "PORTFOLIO_RATE_LIMIT_PER_SECOND", default_value_t = 10)]
    pub per_second: u32,

    /// Burst allowance for standard endpoints
    #[arg(long = "rate-limit-burst", env = "PORTFOLIO_RATE_LIMIT_BURST", default_value_t = 20)]
    pub burst: u32,

    /// Stricter limit for the public contact form
    #[arg(long = "contact-rate-limit-per-second", env = "PORTFOLIO_CONTACT_RATE_LIMIT_PER_SECOND", default_value_t = 1)]
    pub contact_per_second: u32,

    /// Burst allowance for the public contact form
    #[arg(long = "contact-rate-limit-burst", env = "PORTFOLIO_CONTACT_RATE_LIMIT_BURST", default_value_t = 3)]
    pub contact_burst: u32,
}

#[derive(Clone, Debug, Args)]
pub struct SkillsConfig {
    /// Artificial delay before the skills listing responds
    #[arg(long = "skills-delay-ms", env = "PORTFOLIO_SKILLS_DELAY_MS", default_value_t = 5000)]
    pub delay_ms: u64,
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the database readiness check
    #[arg(long = "health-db-timeout-ms", env = "PORTFOLIO_HEALTH_DB_TIMEOUT_MS", default_value_t = 2000)]
    pub db_timeout_ms: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// OTLP collector endpoint. Export is disabled when unset.
    #[arg(long, env = "PORTFOLIO_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Log output format
    #[arg(long, env = "PORTFOLIO_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
