use anyhow::Result;
use chrono::{Duration, NaiveTime, Utc};

use crate::football_data::TIMED_STATUS;
use crate::provider::ScheduleProvider;
use crate::state::{Fixture, Team};

/// Offline catalog and schedule, used when no real source is configured.
/// Kickoffs are placed relative to today so the schedule always looks current.
#[derive(Debug, Clone)]
pub struct SeedProvider {
    teams: Vec<Team>,
    rows: Vec<SeedFixture>,
}

#[derive(Debug, Clone)]
struct SeedFixture {
    id: i64,
    competition: &'static str,
    kickoff: String,
    home: &'static str,
    away: &'static str,
    status: &'static str,
}

impl Default for SeedProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedProvider {
    pub fn new() -> Self {
        Self {
            teams: seed_teams(),
            rows: seed_fixtures(),
        }
    }
}

impl ScheduleProvider for SeedProvider {
    fn name(&self) -> &'static str {
        "seed"
    }

    fn fetch_teams(&self) -> Result<Vec<Team>> {
        Ok(self.teams.clone())
    }

    fn fetch_fixtures(&self, teams: &[Team]) -> Result<Vec<Fixture>> {
        let mut out = Vec::new();
        for team in teams {
            let mut batch: Vec<&SeedFixture> = self
                .rows
                .iter()
                .filter(|row| row.status == TIMED_STATUS)
                .filter(|row| row.home == team.short_name || row.away == team.short_name)
                .collect();
            batch.sort_by(|a, b| a.kickoff.cmp(&b.kickoff));
            out.extend(batch.into_iter().map(|row| Fixture {
                id: row.id,
                competition: row.competition.to_string(),
                kickoff: row.kickoff.clone(),
                home_team: row.home.to_string(),
                away_team: row.away.to_string(),
                status: row.status.to_string(),
                selected_team: team.clone(),
                is_home: row.home == team.short_name,
            }));
        }
        Ok(out)
    }
}

pub fn seed_teams() -> Vec<Team> {
    vec![
        team(57, "Arsenal FC", "Arsenal", "ARS", "Red / White", "England", "Premier League"),
        team(61, "Chelsea FC", "Chelsea", "CHE", "Royal Blue / White", "England", "Premier League"),
        team(64, "Liverpool FC", "Liverpool", "LIV", "Red / White", "England", "Premier League"),
        team(65, "Manchester City FC", "Man City", "MCI", "Sky Blue / White", "England", "Premier League"),
        team(86, "Real Madrid CF", "Real Madrid", "RMA", "White / Purple", "Spain", "Primera Division"),
        team(81, "FC Barcelona", "Barça", "FCB", "Red / Navy Blue / Yellow", "Spain", "Primera Division"),
        team(78, "Club Atlético de Madrid", "Atleti", "ATL", "Red / White / Blue", "Spain", "Primera Division"),
        team(5, "FC Bayern München", "Bayern", "FCB", "Red / White / Blue", "Germany", "Bundesliga"),
        team(4, "Borussia Dortmund", "Dortmund", "BVB", "Black / Yellow", "Germany", "Bundesliga"),
        team(108, "FC Internazionale Milano", "Inter", "INT", "Blue / Black", "Italy", "Serie A"),
        team(98, "AC Milan", "Milan", "MIL", "Red / Black", "Italy", "Serie A"),
        team(109, "Juventus FC", "Juventus", "JUV", "White / Black", "Italy", "Serie A"),
    ]
}

fn seed_fixtures() -> Vec<SeedFixture> {
    const PL: &str = "Premier League";
    const PD: &str = "Primera Division";
    const BL: &str = "Bundesliga";
    const SA: &str = "Serie A";
    const CL: &str = "UEFA Champions League";

    vec![
        row(1001, PL, kickoff(1, 11, 30), "Arsenal", "Chelsea", TIMED_STATUS),
        row(1002, PL, kickoff(1, 16, 30), "Man City", "Liverpool", TIMED_STATUS),
        row(1003, PL, kickoff(8, 14, 0), "Liverpool", "Arsenal", TIMED_STATUS),
        row(1004, PL, kickoff(-6, 14, 0), "Chelsea", "Man City", "FINISHED"),
        row(2001, PD, kickoff(2, 19, 0), "Real Madrid", "Atleti", TIMED_STATUS),
        row(2002, PD, kickoff(2, 21, 0), "Barça", "Real Madrid", "SCHEDULED"),
        row(2003, PD, kickoff(9, 20, 0), "Atleti", "Barça", TIMED_STATUS),
        row(3001, BL, kickoff(1, 16, 30), "Bayern", "Dortmund", TIMED_STATUS),
        row(4001, SA, kickoff(3, 18, 45), "Inter", "Milan", TIMED_STATUS),
        row(4002, SA, kickoff(10, 18, 45), "Juventus", "Inter", TIMED_STATUS),
        row(5001, CL, kickoff(4, 20, 0), "Arsenal", "Bayern", TIMED_STATUS),
        row(5002, CL, kickoff(5, 20, 0), "Real Madrid", "Milan", TIMED_STATUS),
    ]
}

fn team(
    id: i64,
    name: &str,
    short_name: &str,
    tla: &str,
    club_colors: &str,
    area: &str,
    league: &str,
) -> Team {
    Team {
        id,
        name: name.to_string(),
        short_name: short_name.to_string(),
        tla: tla.to_string(),
        crest: format!("https://crests.football-data.org/{id}.png"),
        club_colors: club_colors.to_string(),
        area: area.to_string(),
        league: league.to_string(),
    }
}

fn row(
    id: i64,
    competition: &'static str,
    kickoff: String,
    home: &'static str,
    away: &'static str,
    status: &'static str,
) -> SeedFixture {
    SeedFixture {
        id,
        competition,
        kickoff,
        home,
        away,
        status,
    }
}

/// UTC kickoff `days` from today at `hour:minute`, RFC 3339.
fn kickoff(days: i64, hour: u32, minute: u32) -> String {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    let date = Utc::now().date_naive() + Duration::days(days);
    format!("{}Z", date.and_time(time).format("%Y-%m-%dT%H:%M:%S"))
}
