//! Configuration types.
//!
//! Everything is read from the environment once at startup and handed to the
//! components that need it. Nothing here is mutated after construction.

use std::collections::HashMap;
use std::path::PathBuf;

use secrecy::SecretString;

use crate::conversation::Language;
use crate::error::ConfigError;

/// Static company data and outbound links rendered into replies.
///
/// All values are opaque strings; URLs are not validated.
#[derive(Debug, Clone)]
pub struct BrandConfig {
    pub booking_url: String,
    pub catalog_url: String,
    pub report_url: String,
    pub map_url: String,
    pub linkedin_url: String,
    pub company_name: String,
    pub ceo_name: String,
    /// CEO title per language. The English entry is the fallback.
    pub ceo_title: HashMap<Language, String>,
    pub address: String,
    pub websites: Vec<String>,
}

impl Default for BrandConfig {
    fn default() -> Self {
        let ceo_title = HashMap::from([
            (Language::En, "CEO & Online Business Consultant".to_string()),
            (Language::Fa, "مدیر عامل و مشاور کسب‌وکار آنلاین".to_string()),
            (
                Language::Ar,
                "الرئيس التنفيذي ومستشار الأعمال عبر الإنترنت".to_string(),
            ),
            (Language::Ru, "Генеральный директор и бизнес-консультант".to_string()),
        ]);

        Self {
            booking_url: "https://calendly.com/your-link".to_string(),
            catalog_url: "https://amhrd.com/catalog.pdf".to_string(),
            report_url: "https://artinsmartagent.com/report.pdf".to_string(),
            map_url: "https://maps.google.com/?cid=8846483346399154677&g_mp=Cidnb29nbGUubWFwcy5wbGFjZXMudjEuUGxhY2VzLlNlYXJjaFRleHQ"
                .to_string(),
            linkedin_url: "https://www.linkedin.com/in/arezoomohammadzadegan/".to_string(),
            company_name: "AMHR MARKETING MANAGEMENT LLC".to_string(),
            ceo_name: "Arezoo Mohammadzadegan".to_string(),
            ceo_title,
            address: "Latifa Towers, Dubai".to_string(),
            websites: vec![
                "www.artinwebs.org".to_string(),
                "www.amhrd.com".to_string(),
                "artinsmartagent.com".to_string(),
            ],
        }
    }
}

impl BrandConfig {
    /// Build from environment variables, falling back to the defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        override_from_env(&mut config.booking_url, "LEAD_BOOKING_URL");
        override_from_env(&mut config.catalog_url, "LEAD_CATALOG_URL");
        override_from_env(&mut config.report_url, "LEAD_REPORT_URL");
        override_from_env(&mut config.map_url, "LEAD_MAP_URL");
        override_from_env(&mut config.linkedin_url, "LEAD_LINKEDIN_URL");
        override_from_env(&mut config.company_name, "LEAD_COMPANY_NAME");
        override_from_env(&mut config.ceo_name, "LEAD_CEO_NAME");
        override_from_env(&mut config.address, "LEAD_ADDRESS");

        for lang in Language::ALL {
            let key = format!("LEAD_CEO_TITLE_{}", lang.code().to_uppercase());
            if let Some(title) = non_empty_env(&key) {
                config.ceo_title.insert(lang, title);
            }
        }

        if let Some(raw) = non_empty_env("LEAD_WEBSITES") {
            let websites = split_list(&raw);
            if !websites.is_empty() {
                config.websites = websites;
            }
        }

        config
    }

    /// CEO title for `lang`, falling back to English.
    pub fn ceo_title_for(&self, lang: Language) -> &str {
        self.ceo_title
            .get(&lang)
            .or_else(|| self.ceo_title.get(&Language::En))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// The platform website linked from the platform description.
    ///
    /// This is the last entry of the website list.
    pub fn platform_site(&self) -> &str {
        self.websites.last().map(String::as_str).unwrap_or_default()
    }
}

/// How Telegram updates reach the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelegramMode {
    /// Telegram pushes updates to `POST /webhook`.
    Webhook,
    /// The service long-polls `getUpdates`.
    Polling,
}

impl std::str::FromStr for TelegramMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "webhook" => Ok(Self::Webhook),
            "polling" | "poll" => Ok(Self::Polling),
            other => Err(ConfigError::InvalidValue {
                key: "TELEGRAM_MODE".to_string(),
                message: format!("expected 'webhook' or 'polling', got '{other}'"),
            }),
        }
    }
}

/// Telegram bot credentials and delivery mode.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: SecretString,
    pub mode: TelegramMode,
}

/// Process-level settings for the HTTP server and storage.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub db_path: PathBuf,
    /// `None` when `TELEGRAM_BOT_TOKEN` is unset; the web chat still works.
    pub telegram: Option<TelegramConfig>,
}

impl ServerConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match non_empty_env("LEAD_ASSIST_PORT") {
            Some(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
                key: "LEAD_ASSIST_PORT".to_string(),
                message: format!("{e}"),
            })?,
            None => 8000,
        };

        let db_path = non_empty_env("LEAD_ASSIST_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data/leads.db"));

        let telegram = match non_empty_env("TELEGRAM_BOT_TOKEN") {
            Some(token) => {
                let mode = match non_empty_env("TELEGRAM_MODE") {
                    Some(raw) => raw.parse()?,
                    None => TelegramMode::Webhook,
                };
                Some(TelegramConfig {
                    bot_token: SecretString::from(token),
                    mode,
                })
            }
            None => None,
        };

        Ok(Self {
            port,
            db_path,
            telegram,
        })
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn override_from_env(field: &mut String, key: &str) {
    if let Some(value) = non_empty_env(key) {
        *field = value;
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
