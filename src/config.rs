use anyhow::{bail, Context};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginConfig {
    /// Check the submitted password against the stored hash on `/login`.
    pub verify_password: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub login: LoginConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = required(&lookup, "DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: required(&lookup, "JWT_SECRET")?,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "Admin".into()),
            ttl_minutes: parsed(&lookup, "JWT_TTL_MINUTES", 60 * 24)?,
        };
        if jwt.ttl_minutes <= 0 {
            bail!("JWT_TTL_MINUTES must be positive, got {}", jwt.ttl_minutes);
        }

        Ok(Self {
            database_url,
            db_max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parsed(&lookup, "APP_PORT", 3000)?,
            jwt,
            login: LoginConfig {
                verify_password: parsed(&lookup, "LOGIN_VERIFY_PASSWORD", false)?,
            },
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => bail!("{key} is set but empty"),
        None => bail!("{key} must be set"),
    }
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}
