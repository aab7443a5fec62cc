use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use tracing_subscriber::EnvFilter;
use vulcan_application::{NotificationSettings, RoleUnlockPolicy};
use vulcan_core::AppError;
use vulcan_domain::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpRuntimeConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailProviderConfig {
    Console,
    Smtp(SmtpRuntimeConfig),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub bootstrap_token: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub notifications: NotificationSettings,
    pub email_provider: EmailProviderConfig,
    pub slack_webhook_url: Option<String>,
    pub unlock_minimum_role: Role,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        Self::from_lookup(migrate_only, |name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(migrate_only: bool, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = required(&lookup, "DATABASE_URL")?;
        let frontend_url = lookup("FRONTEND_URL")
            .unwrap_or_else(|| "http://localhost:3000".to_owned())
            .trim_end_matches('/')
            .to_owned();
        let bootstrap_token = required(&lookup, "AUTH_BOOTSTRAP_TOKEN")?;
        let session_secret = required(&lookup, "SESSION_SECRET")?;
        if session_secret.len() < 32 {
            return Err(AppError::Validation(
                "SESSION_SECRET must be at least 32 characters".to_owned(),
            ));
        }

        let api_host = lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = lookup("API_PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);
        let cookie_secure = flag(&lookup, "SESSION_COOKIE_SECURE");

        let notifications = NotificationSettings {
            smtp_enabled: flag(&lookup, "SMTP_ENABLED"),
            slack_enabled: flag(&lookup, "SLACK_ENABLED"),
        };

        let email_provider = match lookup("EMAIL_PROVIDER")
            .unwrap_or_else(|| "console".to_owned())
            .as_str()
        {
            "console" => EmailProviderConfig::Console,
            "smtp" => {
                let port = required_non_empty(&lookup, "SMTP_PORT")?
                    .parse::<u16>()
                    .map_err(|error| AppError::Validation(format!("invalid SMTP_PORT: {error}")))?;
                EmailProviderConfig::Smtp(SmtpRuntimeConfig {
                    host: required_non_empty(&lookup, "SMTP_HOST")?,
                    port,
                    username: optional_non_empty(&lookup, "SMTP_USERNAME"),
                    password: optional_non_empty(&lookup, "SMTP_PASSWORD"),
                    from_address: required_non_empty(&lookup, "SMTP_FROM_ADDRESS")?,
                })
            }
            other => {
                return Err(AppError::Validation(format!(
                    "EMAIL_PROVIDER must be either 'console' or 'smtp', got '{other}'"
                )));
            }
        };

        let slack_webhook_url = if notifications.slack_enabled {
            Some(required_non_empty(&lookup, "SLACK_WEBHOOK_URL")?)
        } else {
            optional_non_empty(&lookup, "SLACK_WEBHOOK_URL")
        };

        let unlock_minimum_role = optional_non_empty(&lookup, "UNLOCK_MINIMUM_ROLE")
            .map(|value| {
                Role::from_str(value.as_str()).map_err(|error| {
                    AppError::Validation(format!("invalid UNLOCK_MINIMUM_ROLE: {error}"))
                })
            })
            .transpose()?
            .unwrap_or(RoleUnlockPolicy::DEFAULT_MINIMUM_ROLE);

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            bootstrap_token,
            api_host,
            api_port,
            cookie_secure,
            notifications,
            email_provider,
            slack_webhook_url,
            unlock_minimum_role,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required<F>(lookup: &F, name: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty<F>(lookup: &F, name: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = required(lookup, name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn optional_non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn flag<F>(lookup: &F, name: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}
