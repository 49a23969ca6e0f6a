use lettre::message::Mailbox;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3737;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_STATIC_DIR: &str = "out";
pub const DEFAULT_MAIL_TO: &str = "duvidas@anic.live";
pub const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("MAIL_TO is not a valid mailbox: {0}")]
    InvalidMailbox(#[from] lettre::address::AddressError),
}

/// Everything the server needs, read once at start-up.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub mail: MailSettings,
}

#[derive(Debug, Clone)]
pub struct MailSettings {
    pub to: Mailbox,
    /// `None` selects the log-only stub transport.
    pub smtp: Option<SmtpSettings>,
}

#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = parse_number("PORT", get("PORT"))?.unwrap_or(DEFAULT_PORT);
        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let static_dir = PathBuf::from(
            get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        );

        let to = get("MAIL_TO")
            .unwrap_or_else(|| DEFAULT_MAIL_TO.to_string())
            .parse::<Mailbox>()?;

        let smtp_port = parse_number::<u16>("SMTP_PORT", get("SMTP_PORT"))?;
        let timeout_secs = parse_number("SMTP_TIMEOUT_SECS", get("SMTP_TIMEOUT_SECS"))?
            .unwrap_or(DEFAULT_SMTP_TIMEOUT_SECS);

        let smtp = match (get("SMTP_HOST"), smtp_port) {
            (Some(host), Some(port)) => Some(SmtpSettings {
                host,
                port,
                username: get("SMTP_USER"),
                password: get("SMTP_PASS"),
                timeout: Duration::from_secs(timeout_secs),
            }),
            _ => None,
        };

        Ok(Settings {
            host,
            port,
            static_dir,
            mail: MailSettings { to, smtp },
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
) -> Result<Option<T>, ConfigError> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
    }
}
