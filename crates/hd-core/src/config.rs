use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    errors::Error,
    faq::{FaqCatalog, DEFAULT_LANGUAGE},
    notify::notifier::{Envelope, DEFAULT_SUBJECT},
    resolver::{DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT},
    Result,
};

/// Typed configuration for the helpdesk service, read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    // HTTP
    pub bind_address: String,
    pub cors_allowed_origins: Vec<String>,

    // Completion provider
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub openai_timeout: Duration,
    pub system_prompt: String,

    // FAQ
    pub faq_file: Option<PathBuf>,
    pub default_language: String,

    // Notifications
    pub notify: NotifyConfig,

    // Logging
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct NotifyConfig {
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from: String,
    pub to: String,
    pub subject: String,
}

impl NotifyConfig {
    pub fn envelope(&self) -> Envelope {
        Envelope {
            from: self.from.clone(),
            to: self.to.clone(),
            subject: self.subject.clone(),
        }
    }
}

impl Config {
    /// Load from the process environment, after merging `./.env` if present.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).and_then(non_empty);

        let openai_api_key = get("OPENAI_API_KEY").ok_or_else(|| {
            Error::Config("OPENAI_API_KEY environment variable is required".to_string())
        })?;
        let openai_model = get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let openai_base_url = get("OPENAI_BASE_URL")
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
            .trim_end_matches('/')
            .to_string();
        let openai_timeout =
            Duration::from_secs(parse_num(&get, "OPENAI_TIMEOUT_SECS")?.unwrap_or(60));
        let system_prompt =
            get("SYSTEM_PROMPT").unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

        let bind_address = get("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8000".to_string());
        let cors_allowed_origins = parse_csv(get("CORS_ALLOWED_ORIGINS"));

        let faq_file = get("FAQ_FILE").map(PathBuf::from);
        let default_language =
            get("DEFAULT_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        let enabled = match get("NOTIFY_ENABLED") {
            Some(v) => parse_bool(&v).ok_or_else(|| {
                Error::Config(format!("NOTIFY_ENABLED must be a boolean, got {v:?}"))
            })?,
            None => true,
        };
        let required = |key: &str| -> Result<String> {
            match get(key) {
                Some(v) => Ok(v),
                None if !enabled => Ok(String::new()),
                None => Err(Error::Config(format!(
                    "{key} environment variable is required when NOTIFY_ENABLED is on"
                ))),
            }
        };
        let notify = NotifyConfig {
            enabled,
            smtp_host: get("SMTP_HOST").unwrap_or_else(|| "smtp.example.com".to_string()),
            smtp_port: parse_num(&get, "SMTP_PORT")?.unwrap_or(587),
            smtp_username: required("SMTP_USERNAME")?,
            smtp_password: required("SMTP_PASSWORD")?,
            from: required("NOTIFY_FROM")?,
            to: required("NOTIFY_TO")?,
            subject: get("NOTIFY_SUBJECT").unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        };

        let log_file = get("LOG_FILE").map(PathBuf::from);

        Ok(Self {
            bind_address,
            cors_allowed_origins,
            openai_api_key,
            openai_model,
            openai_base_url,
            openai_timeout,
            system_prompt,
            faq_file,
            default_language,
            notify,
            log_file,
        })
    }

    /// The FAQ catalog: `FAQ_FILE` when set, the built-in tables otherwise.
    pub fn faq_catalog(&self) -> Result<FaqCatalog> {
        match &self.faq_file {
            Some(path) => FaqCatalog::from_file(path, &self.default_language),
            None => FaqCatalog::builtin().with_default_language(&self.default_language),
        }
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        env::set_var(key, unquote(v.trim()));
    }
}

fn unquote(val: &str) -> &str {
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        &val[1..val.len() - 1]
    } else {
        val
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_num<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = get(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| Error::Config(format!("{key} must be a number, got {raw:?}")))
}

fn parse_csv(v: Option<String>) -> Vec<String> {
    v.unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
