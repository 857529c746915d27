//! Process configuration, read once from the environment (after `.env` is loaded)
//! and passed down explicitly. Nothing below `main` reads the environment.
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::util::cik::{self, Cik, CikError};

pub const DEFAULT_FEED_URL: &str = "https://data.sec.gov/submissions/CIK{cik}.json";
pub const DEFAULT_STATE_PATH: &str = "last_seen.json";
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_TIMEOUT_SECS: u64 = 20;
const DEFAULT_SMTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Everything the feed reader needs.
#[derive(Clone, Debug)]
pub struct FeedConfig {
    pub user_agent: String,
    pub cik: Cik,
    pub url_template: String,
    pub timeout: Duration,
}

impl FeedConfig {
    pub fn url(&self) -> String {
        self.url_template.replace("{cik}", self.cik.as_str())
    }
}

/// Authenticated SMTP relay settings.
#[derive(Clone, Debug)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub recipient: Option<String>,
    pub timeout: Duration,
}

impl MailConfig {
    /// The sender doubles as the default recipient.
    pub fn recipient(&self) -> &str {
        self.recipient.as_deref().unwrap_or(&self.username)
    }
}

/// Raw values as found in the environment; blanks already collapsed to `None`.
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub user_agent: Option<String>,
    pub cik: Option<String>,
    pub company_name: Option<String>,
    pub feed_url: String,
    pub timeout: Duration,
    pub state_path: PathBuf,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_timeout: Duration,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub notify_to: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout = match get("FILING_WATCH_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_nonzero(&v, "FILING_WATCH_TIMEOUT_SECS")?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        let smtp_timeout = match get("SMTP_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_nonzero(&v, "SMTP_TIMEOUT_SECS")?),
            None => Duration::from_secs(DEFAULT_SMTP_TIMEOUT_SECS),
        };
        let smtp_port: u16 = match get("SMTP_PORT") {
            Some(v) => parse_nonzero(&v, "SMTP_PORT")?,
            None => DEFAULT_SMTP_PORT,
        };
        let feed_url = get("FILING_WATCH_FEED_URL").unwrap_or_else(|| DEFAULT_FEED_URL.to_string());
        if !feed_url.contains("{cik}") {
            return Err(ConfigError::Invalid { key: "FILING_WATCH_FEED_URL", reason: "template must contain {cik}".into() });
        }
        // friendly error before any HTTP I/O
        if let Err(e) = Url::parse(&feed_url.replace("{cik}", "0000000000")) {
            return Err(ConfigError::Invalid { key: "FILING_WATCH_FEED_URL", reason: e.to_string() });
        }

        Ok(AppConfig {
            user_agent: get("SEC_USER_AGENT"),
            cik: get("CIK_FILTER"),
            company_name: get("COMPANY_NAME"),
            feed_url,
            timeout,
            state_path: get("FILING_WATCH_STATE_PATH").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH)),
            smtp_host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port,
            smtp_timeout,
            smtp_user: get("GMAIL_USER"),
            smtp_password: get("GMAIL_APP_PASSWORD"),
            notify_to: get("NOTIFY_TO"),
        })
    }

    /// Feed settings; `cik_override` wins over `CIK_FILTER`.
    pub fn feed(&self, cik_override: Option<&str>) -> Result<FeedConfig, ConfigError> {
        let cik_raw = cik_override.map(str::to_string).or_else(|| self.cik.clone());
        let mut missing = Vec::new();
        if self.user_agent.is_none() { missing.push("SEC_USER_AGENT"); }
        if cik_raw.is_none() { missing.push("CIK_FILTER"); }
        let (Some(user_agent), Some(cik_raw)) = (self.user_agent.clone(), cik_raw) else {
            return Err(ConfigError::Missing(missing));
        };
        let cik = cik::normalize(&cik_raw).map_err(invalid_cik)?;
        Ok(FeedConfig { user_agent, cik, url_template: self.feed_url.clone(), timeout: self.timeout })
    }

    /// SMTP settings; `to_override` wins over `NOTIFY_TO`.
    pub fn mail(&self, to_override: Option<&str>) -> Result<MailConfig, ConfigError> {
        let mut missing = Vec::new();
        if self.smtp_user.is_none() { missing.push("GMAIL_USER"); }
        if self.smtp_password.is_none() { missing.push("GMAIL_APP_PASSWORD"); }
        let (Some(username), Some(password)) = (self.smtp_user.clone(), self.smtp_password.clone()) else {
            return Err(ConfigError::Missing(missing));
        };
        Ok(MailConfig {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            username,
            password,
            recipient: to_override.map(str::to_string).or_else(|| self.notify_to.clone()),
            timeout: self.smtp_timeout,
        })
    }
}

// Zero would mean "time out immediately" or "no port", never a usable setting.
fn parse_nonzero<T>(v: &str, key: &'static str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let n = v.parse::<T>().map_err(|_| ConfigError::Invalid { key, reason: format!("{v:?} is not a number") })?;
    if n == T::default() {
        return Err(ConfigError::Invalid { key, reason: "must be greater than zero".into() });
    }
    Ok(n)
}

fn invalid_cik(e: CikError) -> ConfigError {
    ConfigError::Invalid { key: "CIK_FILTER", reason: e.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let c = cfg(&[]).unwrap();
        assert_eq!(c.feed_url, DEFAULT_FEED_URL);
        assert_eq!(c.state_path, PathBuf::from("last_seen.json"));
        assert_eq!(c.smtp_host, "smtp.gmail.com");
        assert_eq!(c.smtp_port, 587);
        assert_eq!(c.timeout, Duration::from_secs(20));
        assert_eq!(c.smtp_timeout, Duration::from_secs(30));
    }

    #[test]
    fn feed_reports_all_missing_keys() {
        let c = cfg(&[("SEC_USER_AGENT", "   ")]).unwrap();
        let err = c.feed(None).unwrap_err();
        match err {
            ConfigError::Missing(keys) => assert_eq!(keys, vec!["SEC_USER_AGENT", "CIK_FILTER"]),
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn feed_url_pads_cik() {
        let c = cfg(&[("SEC_USER_AGENT", "Jane Doe jane@example.com"), ("CIK_FILTER", "320193")]).unwrap();
        let feed = c.feed(None).unwrap();
        assert_eq!(feed.url(), "https://data.sec.gov/submissions/CIK0000320193.json");
        let overridden = c.feed(Some("1318605")).unwrap();
        assert_eq!(overridden.cik.as_str(), "0001318605");
    }

    #[test]
    fn invalid_cik_is_reported() {
        let c = cfg(&[("SEC_USER_AGENT", "ua"), ("CIK_FILTER", "abc")]).unwrap();
        assert!(matches!(c.feed(None), Err(ConfigError::Invalid { key: "CIK_FILTER", .. })));
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let err = cfg(&[("FILING_WATCH_FEED_URL", "https://example.com/feed.json")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "FILING_WATCH_FEED_URL", .. }));
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(matches!(cfg(&[("SMTP_PORT", "smtp")]), Err(ConfigError::Invalid { key: "SMTP_PORT", .. })));
    }

    #[test]
    fn zero_timeouts_and_port_are_rejected() {
        for key in ["FILING_WATCH_TIMEOUT_SECS", "SMTP_TIMEOUT_SECS", "SMTP_PORT"] {
            match cfg(&[(key, "0")]) {
                Err(ConfigError::Invalid { key: k, reason }) => {
                    assert_eq!(k, key);
                    assert!(reason.contains("greater than zero"), "{reason}");
                }
                other => panic!("{key}=0 accepted: {other:?}"),
            }
        }
    }

    #[test]
    fn smtp_timeout_flows_into_mail_config() {
        let c = cfg(&[("GMAIL_USER", "me@example.com"), ("GMAIL_APP_PASSWORD", "secret"), ("SMTP_TIMEOUT_SECS", "45")]).unwrap();
        assert_eq!(c.mail(None).unwrap().timeout, Duration::from_secs(45));
    }

    #[test]
    fn mail_recipient_defaults_to_sender() {
        let c = cfg(&[("GMAIL_USER", "me@example.com"), ("GMAIL_APP_PASSWORD", "secret")]).unwrap();
        assert_eq!(c.mail(None).unwrap().recipient(), "me@example.com");
        assert_eq!(c.mail(Some("ops@example.com")).unwrap().recipient(), "ops@example.com");
    }

    #[test]
    fn mail_requires_credentials() {
        let c = cfg(&[("GMAIL_USER", "me@example.com")]).unwrap();
        match c.mail(None).unwrap_err() {
            ConfigError::Missing(keys) => assert_eq!(keys, vec!["GMAIL_APP_PASSWORD"]),
            other => panic!("unexpected: {other}"),
        }
    }
}
