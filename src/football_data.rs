use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::http_client::{fetch_text, http_client};
use crate::provider::ScheduleProvider;
use crate::state::{Fixture, Team};

pub const TIMED_STATUS: &str = "TIMED";
const AUTH_HEADER: &str = "X-Auth-Token";

/// football-data.org v4 client. Teams come from the configured competitions,
/// fixtures from each selected team's `TIMED` matches.
#[derive(Debug, Clone)]
pub struct FootballDataProvider {
    base: String,
    token: String,
    competitions: Vec<String>,
}

impl FootballDataProvider {
    pub fn new(base: impl Into<String>, token: impl Into<String>, competitions: Vec<String>) -> Self {
        Self {
            base: base.into(),
            token: token.into(),
            competitions,
        }
    }

    pub fn fetch_competition_teams(&self, code: &str) -> Result<Vec<Team>> {
        let url = format!("{}/competitions/{code}/teams", self.base);
        let body = self.get(&url).with_context(|| format!("teams request for {code}"))?;
        parse_teams_json(&body)
    }

    pub fn fetch_team_fixtures(&self, team: &Team) -> Result<Vec<Fixture>> {
        let url = format!("{}/teams/{}/matches?status={TIMED_STATUS}", self.base, team.id);
        let body = self
            .get(&url)
            .with_context(|| format!("matches request for {}", team.short_name))?;
        parse_matches_json(&body, team)
    }

    fn get(&self, url: &str) -> Result<String> {
        let client = http_client()?;
        fetch_text(client, url, &[(AUTH_HEADER, self.token.as_str())])
    }
}

impl ScheduleProvider for FootballDataProvider {
    fn name(&self) -> &'static str {
        "football-data"
    }

    fn fetch_teams(&self) -> Result<Vec<Team>> {
        if self.competitions.is_empty() {
            return Err(anyhow!("no competitions configured"));
        }
        let mut out = Vec::new();
        for code in &self.competitions {
            out.extend(self.fetch_competition_teams(code)?);
        }
        Ok(out)
    }

    fn fetch_fixtures(&self, teams: &[Team]) -> Result<Vec<Fixture>> {
        let mut out = Vec::new();
        for team in teams {
            out.extend(self.fetch_team_fixtures(team)?);
        }
        Ok(out)
    }
}

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    competition: Option<Competition>,
    #[serde(default)]
    teams: Vec<ApiTeam>,
}

#[derive(Debug, Deserialize)]
struct Competition {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTeam {
    id: i64,
    name: String,
    short_name: Option<String>,
    tla: Option<String>,
    crest: Option<String>,
    club_colors: Option<String>,
    area: Option<Area>,
}

#[derive(Debug, Deserialize)]
struct Area {
    name: String,
}

#[derive(Debug, Deserialize)]
struct MatchesResponse {
    #[serde(default)]
    matches: Vec<ApiMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMatch {
    id: i64,
    utc_date: String,
    status: String,
    competition: Option<Competition>,
    home_team: Side,
    away_team: Side,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Side {
    id: Option<i64>,
    name: Option<String>,
    short_name: Option<String>,
}

impl Side {
    fn display_name(&self) -> String {
        self.short_name
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_default()
    }
}

/// Parses a `/competitions/{code}/teams` body. Each team's league is the
/// competition name.
pub fn parse_teams_json(raw: &str) -> Result<Vec<Team>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let resp: TeamsResponse =
        serde_json::from_str(trimmed).context("invalid football-data teams json")?;
    let league = resp.competition.map(|c| c.name).unwrap_or_default();

    Ok(resp
        .teams
        .into_iter()
        .map(|t| Team {
            id: t.id,
            short_name: t.short_name.unwrap_or_else(|| t.name.clone()),
            name: t.name,
            tla: t.tla.unwrap_or_default(),
            crest: t.crest.unwrap_or_default(),
            club_colors: t.club_colors.unwrap_or_default(),
            area: t.area.map(|a| a.name).unwrap_or_default(),
            league: league.clone(),
        })
        .collect())
}

/// Parses a `/teams/{id}/matches` body into fixtures for `team`, keeping only
/// `TIMED` matches in kickoff order.
pub fn parse_matches_json(raw: &str, team: &Team) -> Result<Vec<Fixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let resp: MatchesResponse =
        serde_json::from_str(trimmed).context("invalid football-data matches json")?;

    let mut out: Vec<Fixture> = resp
        .matches
        .into_iter()
        .filter(|m| m.status == TIMED_STATUS)
        .map(|m| {
            let home_team = m.home_team.display_name();
            let is_home = match m.home_team.id {
                Some(id) => id == team.id,
                None => home_team == team.short_name,
            };
            Fixture {
                id: m.id,
                competition: m.competition.map(|c| c.name).unwrap_or_default(),
                kickoff: m.utc_date,
                away_team: m.away_team.display_name(),
                home_team,
                status: m.status,
                selected_team: team.clone(),
                is_home,
            }
        })
        .collect();
    out.sort_by(|a, b| a.kickoff.cmp(&b.kickoff));
    Ok(out)
}
