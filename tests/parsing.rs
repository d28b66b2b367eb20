use std::fs;
use std::path::PathBuf;

use matchday_terminal::football_data::{parse_matches_json, parse_teams_json};
use matchday_terminal::state::Team;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn arsenal() -> Team {
    let raw = read_fixture("football_data_teams.json");
    parse_teams_json(&raw)
        .expect("fixture should parse")
        .into_iter()
        .find(|t| t.id == 57)
        .expect("arsenal should be in the fixture")
}

#[test]
fn parses_competition_teams() {
    let raw = read_fixture("football_data_teams.json");
    let teams = parse_teams_json(&raw).expect("fixture should parse");
    assert_eq!(teams.len(), 3);

    let ars = &teams[0];
    assert_eq!(ars.id, 57);
    assert_eq!(ars.name, "Arsenal FC");
    assert_eq!(ars.short_name, "Arsenal");
    assert_eq!(ars.tla, "ARS");
    assert_eq!(ars.club_colors, "Red / White");
    assert_eq!(ars.area, "England");
    assert_eq!(ars.league, "Premier League");
}

#[test]
fn team_without_short_name_falls_back_to_name() {
    let raw = read_fixture("football_data_teams.json");
    let teams = parse_teams_json(&raw).expect("fixture should parse");
    let bou = teams.iter().find(|t| t.id == 1044).expect("bournemouth");
    assert_eq!(bou.short_name, "AFC Bournemouth");
    assert!(bou.tla.is_empty());
    assert!(bou.crest.is_empty());
}

#[test]
fn parses_timed_matches_in_kickoff_order() {
    let team = arsenal();
    let raw = read_fixture("football_data_matches.json");
    let fixtures = parse_matches_json(&raw, &team).expect("fixture should parse");

    assert_eq!(fixtures.len(), 2, "finished match is dropped");
    assert_eq!(fixtures[0].id, 497401);
    assert_eq!(fixtures[0].home_team, "Man United");
    assert_eq!(fixtures[0].away_team, "Arsenal");
    assert!(!fixtures[0].is_home);
    assert_eq!(fixtures[1].id, 497411);
    assert!(fixtures[1].is_home);
    assert_eq!(fixtures[1].kickoff, "2024-05-19T15:00:00Z");
    assert_eq!(fixtures[1].competition, "Premier League");
    assert!(fixtures.iter().all(|f| f.selected_team.id == 57));
    assert!(fixtures.iter().all(|f| f.status == "TIMED"));
}

#[test]
fn null_and_empty_bodies_are_empty() {
    let team = arsenal();
    assert!(parse_teams_json("null").expect("null should parse").is_empty());
    assert!(parse_teams_json("  ").expect("blank should parse").is_empty());
    assert!(
        parse_matches_json("null", &team)
            .expect("null should parse")
            .is_empty()
    );
    assert!(
        parse_matches_json(r#"{"matches":[]}"#, &team)
            .expect("empty list should parse")
            .is_empty()
    );
}

#[test]
fn malformed_json_is_an_error() {
    let team = arsenal();
    assert!(parse_teams_json("{not json").is_err());
    assert!(parse_matches_json("[1,2", &team).is_err());
}
