use std::env;
use std::path::PathBuf;

const DEFAULT_FOOTBALL_DATA_BASE: &str = "https://api.football-data.org/v4";
/// Premier League, Primera Division, Bundesliga, Serie A.
const DEFAULT_COMPETITIONS: &[&str] = &["PL", "PD", "BL1", "SA"];
const CACHE_DIR: &str = "matchday_terminal";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSource {
    Seed,
    Sqlite,
    FootballData,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: ScheduleSource,
    pub db_path: Option<PathBuf>,
    pub football_data_token: Option<String>,
    pub football_data_base: String,
    pub competitions: Vec<String>,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy` first if `.env` files
    /// should participate.
    pub fn from_env() -> Self {
        let source = opt_env("SCHEDULE_SOURCE")
            .map(|raw| parse_source(&raw))
            .unwrap_or(ScheduleSource::Seed);
        let db_path = opt_env("SCHEDULE_DB")
            .map(PathBuf::from)
            .or_else(default_db_path);
        let competitions = match env::var("FOOTBALL_DATA_COMPETITIONS") {
            Ok(raw) if !raw.trim().is_empty() => parse_codes(&raw),
            _ => DEFAULT_COMPETITIONS.iter().map(|c| c.to_string()).collect(),
        };

        Self {
            source,
            db_path,
            football_data_token: opt_env("FOOTBALL_DATA_TOKEN"),
            football_data_base: opt_env("FOOTBALL_DATA_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_FOOTBALL_DATA_BASE.to_string()),
            competitions,
        }
    }
}

pub fn parse_source(raw: &str) -> ScheduleSource {
    match raw.trim().to_ascii_lowercase().as_str() {
        "sqlite" | "db" => ScheduleSource::Sqlite,
        "football-data" | "football_data" | "footballdata" | "api" => ScheduleSource::FootballData,
        _ => ScheduleSource::Seed,
    }
}

pub fn parse_codes(raw: &str) -> Vec<String> {
    raw.split([',', ';', ' '])
        .map(|part| part.trim().to_ascii_uppercase())
        .filter(|part| !part.is_empty())
        .collect()
}

pub fn app_cache_dir() -> Option<PathBuf> {
    if let Some(base) = opt_env("XDG_CACHE_HOME") {
        return Some(PathBuf::from(base).join(CACHE_DIR));
    }
    let home = opt_env("HOME")?;
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR))
}

pub fn default_db_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join("schedule.sqlite"))
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .and_then(|val| if val.trim().is_empty() { None } else { Some(val) })
}
