use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEV_ADMIN_PASSWORD: &str = "change-me";
pub const DEV_ADMIN_TOKEN: &str = "dev-admin-token-change-me";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

/// All interfaces; set `SERVER_HOST` to narrow it.
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: DEFAULT_HOST.into(), port: 3000, worker_threads: Some(4) }
    }
}

/// TLS behaviour for the database connection, mapped onto libpq `sslmode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SslMode {
    Disable,
    #[default]
    Prefer,
    /// Encrypt, but accept any server certificate.
    Require,
}

impl SslMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" => Some(SslMode::Disable),
            "prefer" => Some(SslMode::Prefer),
            "require" | "no-verify" => Some(SslMode::Require),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub ssl_mode: SslMode,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            ssl_mode: SslMode::default(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub password: String,
    pub token: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self { password: DEV_ADMIN_PASSWORD.into(), token: DEV_ADMIN_TOKEN.into() }
    }
}

impl AdminConfig {
    pub fn uses_dev_defaults(&self) -> bool {
        self.password == DEV_ADMIN_PASSWORD || self.token == DEV_ADMIN_TOKEN
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { enabled: true, window_secs: default_window_secs(), max_requests: default_max_requests() }
    }
}

fn default_true() -> bool { true }
fn default_window_secs() -> u64 { 15 * 60 }
fn default_max_requests() -> u32 { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { static_dir: default_static_dir() }
    }
}

fn default_static_dir() -> String { "frontend".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl AppConfig {
    /// `config.toml` when present, otherwise defaults; environment always wins.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.apply_env();
        self.server.normalize()?;
        self.database.validate()?;
        self.rate_limit.validate()?;
        if self.admin.password.is_empty() || self.admin.token.is_empty() {
            return Err(anyhow!("admin.password and admin.token must not be empty"));
        }
        Ok(())
    }

    fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    pub fn apply_env_from<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(mode) = non_empty("DATABASE_SSL_MODE").and_then(|v| SslMode::parse(&v)) {
            self.database.ssl_mode = mode;
        }
        if let Some(pw) = non_empty("ADMIN_PASSWORD") {
            self.admin.password = pw;
        }
        if let Some(token) = non_empty("ADMIN_TOKEN") {
            self.admin.token = token;
        }
        if let Some(host) = non_empty("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = non_empty("PORT")
            .or_else(|| non_empty("SERVER_PORT"))
            .and_then(|p| p.parse::<u16>().ok())
        {
            self.server.port = port;
        }
        if let Some(w) = non_empty("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(secs) = non_empty("RATE_LIMIT_WINDOW_SECS").and_then(|v| v.parse::<u64>().ok()) {
            self.rate_limit.window_secs = secs;
        }
        if let Some(max) = non_empty("RATE_LIMIT_MAX").and_then(|v| v.parse::<u32>().ok()) {
            self.rate_limit.max_requests = max;
        }
        if let Some(dir) = non_empty("STATIC_DIR") {
            self.site.static_dir = dir;
        }
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = DEFAULT_HOST.to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive"));
        }
        Ok(())
    }

    /// Connection URL with `sslmode` applied unless the URL already carries one.
    pub fn effective_url(&self) -> String {
        if self.url.contains("sslmode=") {
            return self.url.clone();
        }
        let sep = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}sslmode={}", self.url, sep, self.ssl_mode.as_str())
    }
}

impl RateLimitConfig {
    fn validate(&self) -> Result<()> {
        if self.enabled && (self.window_secs == 0 || self.max_requests == 0) {
            return Err(anyhow!("rate_limit.window_secs and rate_limit.max_requests must be positive"));
        }
        Ok(())
    }
}
