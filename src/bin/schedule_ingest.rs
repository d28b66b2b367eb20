use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};

use matchday_terminal::config::AppConfig;
use matchday_terminal::football_data::FootballDataProvider;
use matchday_terminal::team_db;

// Free football-data.org tier allows 10 requests per minute.
const DEFAULT_GAP_MS: u64 = 6_500;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = AppConfig::from_env();
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let db_path = arg_value(&args, "--db")
        .map(PathBuf::from)
        .or_else(|| config.db_path.clone())
        .context("unable to resolve sqlite path")?;
    let gap = Duration::from_millis(
        arg_value(&args, "--gap-ms")
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(DEFAULT_GAP_MS),
    );
    let token = config
        .football_data_token
        .clone()
        .ok_or_else(|| anyhow!("FOOTBALL_DATA_TOKEN is not set"))?;
    let api = FootballDataProvider::new(
        config.football_data_base.clone(),
        token,
        config.competitions.clone(),
    );

    let mut conn = team_db::open_db(&db_path)?;
    let mut errors = Vec::new();

    let mut teams = Vec::new();
    for code in &config.competitions {
        match api.fetch_competition_teams(code) {
            Ok(batch) => teams.extend(batch),
            Err(err) => errors.push(format!("{code}: {err:#}")),
        }
        thread::sleep(gap);
    }
    let teams_upserted = team_db::upsert_teams(&mut conn, &teams)?;

    let mut fixtures_upserted = 0usize;
    for team in &teams {
        match api.fetch_team_fixtures(team) {
            Ok(batch) => fixtures_upserted += team_db::upsert_fixtures(&mut conn, &batch)?,
            Err(err) => errors.push(format!("{}: {err:#}", team.short_name)),
        }
        thread::sleep(gap);
    }

    println!("Schedule ingest complete");
    println!("DB: {}", db_path.display());
    println!("Teams upserted: {teams_upserted}");
    println!("Fixture rows written: {fixtures_upserted}");
    if !errors.is_empty() {
        println!("Errors: {}", errors.len());
        for err in errors.iter().take(8) {
            println!(" - {err}");
        }
    }

    Ok(())
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.clone());
            }
        }
    }
    None
}
