use std::env::var;
use std::str::FromStr;

use dotenvy::dotenv;

use crate::infrastructure::generation::gemini::DEFAULT_BASE_URL;

pub struct Config {
    pub port: u16,
    pub scheme: String,
    pub host: String,
    pub state_path: String,
    pub gemini: GeminiConfig,
    pub queue: QueueConfig,
    pub dispatch_log_capacity: usize,
}

pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

pub struct QueueConfig {
    pub low_water: usize,
    pub refill_batch: usize,
    pub seed_batch: usize,
}

impl Config {
    pub fn try_parse() -> Result<Config, &'static str> {
        let _ = dotenv();

        Ok(Config {
            port: var("PORT")
                .map_err(|_| "An error occured while getting PORT env param")?
                .parse::<u16>()
                .map_err(|_| "An error occured while parsing PORT env param")?,
            scheme: var("SCHEME").map_err(|_| "An error occured while getting SCHEME env param")?,
            host: var("HOST").map_err(|_| "An error occured while getting HOST env param")?,
            state_path: var("STATE_PATH").unwrap_or_else(|_| "wave_state.json".to_string()),
            gemini: GeminiConfig {
                api_key: var("GEMINI_API_KEY").ok().filter(|key| !key.trim().is_empty()),
                model: var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-3-flash-preview".to_string()),
                base_url: var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            },
            queue: QueueConfig {
                low_water: parse_or(
                    "QUEUE_LOW_WATER",
                    5,
                    "An error occured while parsing QUEUE_LOW_WATER env param",
                )?,
                refill_batch: parse_or(
                    "QUEUE_REFILL_BATCH",
                    20,
                    "An error occured while parsing QUEUE_REFILL_BATCH env param",
                )?,
                seed_batch: parse_or(
                    "QUEUE_SEED_BATCH",
                    25,
                    "An error occured while parsing QUEUE_SEED_BATCH env param",
                )?,
            },
            dispatch_log_capacity: parse_or(
                "DISPATCH_LOG_CAPACITY",
                100,
                "An error occured while parsing DISPATCH_LOG_CAPACITY env param",
            )?,
        })
    }
}

fn parse_or<T: FromStr>(key: &str, default: T, error: &'static str) -> Result<T, &'static str> {
    parse_value(var(key).ok(), default, error)
}

/// Unset keeps the default; a present but malformed value is an error.
fn parse_value<T: FromStr>(
    raw: Option<String>,
    default: T,
    error: &'static str,
) -> Result<T, &'static str> {
    match raw {
        Some(raw) => raw.trim().parse::<T>().map_err(|_| error),
        None => Ok(default),
    }
}
