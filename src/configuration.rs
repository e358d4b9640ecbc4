use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

pub const API_KEY_ENV: &str = "BRAVE_API_KEY";

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub filter: FilterSettings,
    #[serde(default)]
    pub verification: VerificationSettings,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ApplicationSettings {
    /// Written verbatim into every job entry's `location`.
    pub center: String,
    pub output_path: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub delay_ms: u64,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        ApplicationSettings {
            center: "Frankfurt am Main".to_string(),
            output_path: "jobs_verified_frankfurt_biochem.json".to_string(),
            delay_ms: 500,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SearchSettings {
    /// Filled from the environment, never from the config file.
    #[serde(skip)]
    pub api_key: String,
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub result_count: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
    pub keywords: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            api_key: String::new(),
            base_url: "https://api.search.brave.com".to_string(),
            result_count: 10,
            timeout_secs: 30,
            keywords: [
                "Biochemistry Scientist Frankfurt",
                "Postdoc Biochemistry Frankfurt",
                "Research Scientist Biochemistry Frankfurt",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct FilterSettings {
    pub allowed_sites: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        FilterSettings {
            allowed_sites: ["stepstone.de", "jobs.", "career", "careers"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct VerificationSettings {
    pub enabled: bool,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
    pub user_agent: String,
    pub closed_phrases: Vec<String>,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        VerificationSettings {
            enabled: true,
            timeout_secs: 20,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36".to_string(),
            closed_phrases: [
                "position has been filled",
                "no longer available",
                "no longer accepting applications",
                "this job has expired",
                "job is closed",
                "stelle ist bereits besetzt",
                "nicht mehr verfügbar",
                "bewerbungsfrist abgelaufen",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
        }
    }
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let api_key = read_api_key(std::env::var(API_KEY_ENV).ok())?;

    let mut settings = load_settings(app_environment())?;
    settings.search.api_key = api_key;

    Ok(settings)
}

fn read_api_key(value: Option<String>) -> Result<String, ConfigError> {
    value
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ConfigError::NotFound(format!("{} missing", API_KEY_ENV)))
}

fn app_environment() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
}

fn load_settings(environment: Environment) -> Result<Settings, ConfigError> {
    Config::builder()
        .add_source(File::with_name("configuration/base").required(false))
        .add_source(environment)
        .build()?
        .try_deserialize()
}
