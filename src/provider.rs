use anyhow::{Context, Result, anyhow};

use crate::config::{AppConfig, ScheduleSource};
use crate::football_data::FootballDataProvider;
use crate::seed::SeedProvider;
use crate::state::{Fixture, Team};
use crate::team_db::SqliteProvider;

/// Where teams and fixtures come from. Implementations run on the feed worker
/// thread and may block.
pub trait ScheduleProvider: Send {
    fn name(&self) -> &'static str;

    /// The full team catalog.
    fn fetch_teams(&self) -> Result<Vec<Team>>;

    /// Scheduled fixtures for `teams`: one batch per team, concatenated in
    /// the given order. Batches are not merged, so a meeting of two selected
    /// teams appears once per team.
    fn fetch_fixtures(&self, teams: &[Team]) -> Result<Vec<Fixture>>;
}

pub fn provider_from_config(config: &AppConfig) -> Result<Box<dyn ScheduleProvider>> {
    match config.source {
        ScheduleSource::Seed => Ok(Box::new(SeedProvider::new())),
        ScheduleSource::Sqlite => {
            let path = config
                .db_path
                .as_deref()
                .ok_or_else(|| anyhow!("no sqlite path (set SCHEDULE_DB)"))?;
            let provider = SqliteProvider::open(path).context("sqlite provider")?;
            Ok(Box::new(provider))
        }
        ScheduleSource::FootballData => {
            let token = config
                .football_data_token
                .clone()
                .ok_or_else(|| anyhow!("FOOTBALL_DATA_TOKEN is not set"))?;
            Ok(Box::new(FootballDataProvider::new(
                config.football_data_base.clone(),
                token,
                config.competitions.clone(),
            )))
        }
    }
}
