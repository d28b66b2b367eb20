use matchday_terminal::provider::ScheduleProvider;
use matchday_terminal::state::{Fixture, Team};
use matchday_terminal::team_db::{
    SqliteProvider, init_schema, load_fixtures, load_fixtures_for_team, load_teams,
    upsert_fixtures, upsert_teams,
};
use rusqlite::Connection;

fn team(id: i64, short: &str, area: &str, league: &str) -> Team {
    Team {
        id,
        name: format!("{short} FC"),
        short_name: short.to_string(),
        tla: short[..3].to_uppercase(),
        crest: String::new(),
        club_colors: String::new(),
        area: area.to_string(),
        league: league.to_string(),
    }
}

fn row(id: i64, date: &str, home: &str, away: &str, status: &str) -> Fixture {
    Fixture {
        id,
        competition: "Premier League".to_string(),
        kickoff: date.to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        status: status.to_string(),
        selected_team: team(0, "Placeholder", "", ""),
        is_home: false,
    }
}

fn seeded_db() -> Connection {
    let mut conn = Connection::open_in_memory().expect("in-memory db");
    init_schema(&conn).expect("schema");
    upsert_teams(
        &mut conn,
        &[
            team(57, "Arsenal", "England", "Premier League"),
            team(61, "Chelsea", "England", "Premier League"),
            team(108, "Inter", "Italy", "Serie A"),
        ],
    )
    .expect("teams");
    upsert_fixtures(
        &mut conn,
        &[
            row(3, "2024-05-19T15:00:00Z", "Arsenal", "Everton", "TIMED"),
            row(1, "2024-05-04T11:30:00Z", "Arsenal", "Bournemouth", "FINISHED"),
            row(2, "2024-05-12T15:30:00Z", "Man United", "Arsenal", "TIMED"),
            row(4, "2024-05-15T19:00:00Z", "Chelsea", "Arsenal", "TIMED"),
            row(5, "2024-05-20T18:45:00Z", "Inter", "Lazio", "SCHEDULED"),
        ],
    )
    .expect("fixtures");
    conn
}

#[test]
fn init_schema_is_idempotent() {
    let conn = Connection::open_in_memory().expect("in-memory db");
    init_schema(&conn).expect("first");
    init_schema(&conn).expect("second");
    assert!(load_teams(&conn).expect("teams").is_empty());
}

#[test]
fn team_upsert_overwrites_by_id() {
    let mut conn = seeded_db();
    let mut renamed = team(61, "Chelsea", "England", "Premier League");
    renamed.club_colors = "Royal Blue / White".to_string();
    upsert_teams(&mut conn, &[renamed]).expect("upsert");

    let teams = load_teams(&conn).expect("teams");
    assert_eq!(teams.len(), 3);
    let chelsea = teams.iter().find(|t| t.id == 61).expect("chelsea");
    assert_eq!(chelsea.club_colors, "Royal Blue / White");
    assert_eq!(chelsea.league, "Premier League");
}

#[test]
fn fixtures_for_team_are_timed_and_date_ordered() {
    let conn = seeded_db();
    let arsenal = team(57, "Arsenal", "England", "Premier League");

    let fixtures = load_fixtures_for_team(&conn, &arsenal).expect("fixtures");
    let ids: Vec<i64> = fixtures.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![2, 4, 3]);

    assert!(fixtures.iter().all(|f| f.status == "TIMED"));
    assert!(fixtures.iter().all(|f| f.selected_team == arsenal));
    let home: Vec<bool> = fixtures.iter().map(|f| f.is_home).collect();
    assert_eq!(home, vec![false, false, true]);
}

#[test]
fn team_without_scheduled_matches_yields_nothing() {
    let conn = seeded_db();
    let inter = team(108, "Inter", "Italy", "Serie A");
    assert!(load_fixtures_for_team(&conn, &inter).expect("fixtures").is_empty());
}

#[test]
fn batches_follow_selection_order_and_keep_shared_matches() {
    let conn = seeded_db();
    let chelsea = team(61, "Chelsea", "England", "Premier League");
    let arsenal = team(57, "Arsenal", "England", "Premier League");

    let fixtures = load_fixtures(&conn, &[chelsea.clone(), arsenal.clone()]).expect("fixtures");
    let pairs: Vec<(i64, i64)> = fixtures
        .iter()
        .map(|f| (f.id, f.selected_team.id))
        .collect();
    // Chelsea v Arsenal appears once per selected team.
    assert_eq!(pairs, vec![(4, 61), (2, 57), (4, 57), (3, 57)]);
    assert!(fixtures[0].is_home);
    assert!(!fixtures[2].is_home);
}

#[test]
fn fixture_upsert_updates_status() {
    let mut conn = seeded_db();
    upsert_fixtures(
        &mut conn,
        &[row(3, "2024-05-19T15:00:00Z", "Arsenal", "Everton", "FINISHED")],
    )
    .expect("upsert");
    let arsenal = team(57, "Arsenal", "England", "Premier League");
    let ids: Vec<i64> = load_fixtures_for_team(&conn, &arsenal)
        .expect("fixtures")
        .iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(ids, vec![2, 4]);
}

#[test]
fn sqlite_provider_serves_catalog_and_fixtures() {
    let provider = SqliteProvider::new(seeded_db());
    assert_eq!(provider.name(), "sqlite");
    assert_eq!(provider.fetch_teams().expect("teams").len(), 3);

    let inter = team(108, "Inter", "Italy", "Serie A");
    let chelsea = team(61, "Chelsea", "England", "Premier League");
    let fixtures = provider
        .fetch_fixtures(&[inter, chelsea])
        .expect("fixtures");
    assert_eq!(fixtures.len(), 1);
    assert_eq!(fixtures[0].away_team, "Arsenal");
}
