use crate::error::{BadEnvVarSnafu, KalumResult, ParseEnvVarSnafu};
use dotenvy::var;
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use std::{num::NonZeroU32, str::FromStr, sync::Arc};

const DEFAULT_MAX_CONNECTIONS: u32 = 15;
const DEFAULT_PAGE_SIZE: NonZeroU32 = NonZeroU32::new(5).unwrap();
const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    db_config: Arc<DbConfig>,
    page_size: NonZeroU32,
    server_ip: String,
}

impl RuntimeConfiguration {
    pub fn new() -> KalumResult<Self> {
        Ok(Self {
            db_config: Arc::new(DbConfig::new()?),
            page_size: parse_optional(
                "KALUM_PAGE_REGISTROS",
                var("KALUM_PAGE_REGISTROS").ok(),
                DEFAULT_PAGE_SIZE,
            )?,
            server_ip: var("KALUM_SERVER_IP").unwrap_or_else(|_| DEFAULT_SERVER_IP.to_string()),
        })
    }

    pub fn db_config(&self) -> Arc<DbConfig> {
        self.db_config.clone()
    }

    pub const fn page_size(&self) -> NonZeroU32 {
        self.page_size
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }
}

#[derive(Debug)]
pub struct DbConfig {
    user: String,
    password: SecretString,
    path: String,
    port: u16,
    database: String,
    max_connections: u32,
}

impl DbConfig {
    pub fn new() -> KalumResult<Self> {
        let get_env_var = |name| var(name).context(BadEnvVarSnafu { name });

        Ok(Self {
            user: get_env_var("DB_USER")?,
            password: SecretString::from(get_env_var("DB_PASSWORD")?),
            path: get_env_var("DB_PATH")?,
            port: parse_required("DB_PORT", get_env_var("DB_PORT")?)?,
            database: get_env_var("DB_NAME")?,
            max_connections: parse_optional(
                "DB_MAX_CONNECTIONS",
                var("DB_MAX_CONNECTIONS").ok(),
                DEFAULT_MAX_CONNECTIONS,
            )?,
        })
    }

    pub fn get_db_path(&self) -> SecretString {
        SecretString::from(format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.path,
            self.port,
            self.database
        ))
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }
}

fn parse_required<T>(name: &'static str, raw: String) -> KalumResult<T>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    raw.trim().parse().context(ParseEnvVarSnafu {
        name,
        original: raw.clone(),
    })
}

fn parse_optional<T>(name: &'static str, raw: Option<String>, default: T) -> KalumResult<T>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    raw.map_or(Ok(default), |raw| parse_required(name, raw))
}
