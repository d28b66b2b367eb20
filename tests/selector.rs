use matchday_terminal::selection::TeamSelection;
use matchday_terminal::selector::{SelectorLevel, TeamSelector, default_team};
use matchday_terminal::state::Team;

fn team(id: i64, name: &str, short: &str, area: &str, league: &str) -> Team {
    Team {
        id,
        name: name.to_string(),
        short_name: short.to_string(),
        tla: String::new(),
        crest: String::new(),
        club_colors: String::new(),
        area: area.to_string(),
        league: league.to_string(),
    }
}

fn catalog() -> Vec<Team> {
    vec![
        team(57, "Arsenal FC", "Arsenal", "England", "Premier League"),
        team(61, "Chelsea FC", "Chelsea", "England", "Premier League"),
        // A Spanish team listed under a league the static table doesn't pair
        // with Spain, ahead of the Primera Division clubs.
        team(777, "Segunda Club", "Segunda", "Spain", "Segunda Division"),
        team(86, "Real Madrid CF", "Real Madrid", "Spain", "Primera Division"),
        team(81, "FC Barcelona", "Barça", "Spain", "Primera Division"),
        team(5, "FC Bayern München", "Bayern", "Germany", "Bundesliga"),
        // Same league name as Germany's, different country.
        team(900, "Bundesliga Wien", "Wien", "Austria", "Bundesliga"),
    ]
}

#[test]
fn country_change_reads_league_from_first_catalog_team() {
    let catalog = catalog();
    let selector = TeamSelector::default().select(SelectorLevel::Country, 1, &catalog);

    assert_eq!(selector.country, "Spain");
    assert_eq!(selector.league.as_deref(), Some("Segunda Division"));
    assert_eq!(selector.candidate.as_ref().map(|t| t.id), Some(777));

    // The visible league list still comes from the static table.
    assert_eq!(selector.league_options(), vec!["Primera Division"]);
    assert_eq!(selector.current_index(SelectorLevel::League, &catalog), None);
}

#[test]
fn league_change_picks_candidate_without_country_filter() {
    let catalog: Vec<Team> = {
        let mut c = catalog();
        // Put the Austrian "Bundesliga" side first.
        c.retain(|t| t.id != 5);
        c.push(team(5, "FC Bayern München", "Bayern", "Germany", "Bundesliga"));
        c
    };
    let selector = TeamSelector::default()
        .select(SelectorLevel::Country, 2, &catalog)
        .select(SelectorLevel::League, 0, &catalog);

    assert_eq!(selector.country, "Germany");
    assert_eq!(selector.league.as_deref(), Some("Bundesliga"));
    let candidate = selector.candidate.clone().expect("a bundesliga team");
    assert_eq!(candidate.id, 900);
    assert_eq!(candidate.area, "Austria");

    // Stale candidate: not in the visible team list.
    let visible: Vec<i64> = selector.team_options(&catalog).iter().map(|t| t.id).collect();
    assert_eq!(visible, vec![5]);
    assert!(!visible.contains(&candidate.id));

    // Commit still uses it.
    let (selection, _) = selector.commit(&TeamSelection::new());
    assert_eq!(selection.teams()[0].id, 900);
}

#[test]
fn team_change_takes_index_in_filtered_list() {
    let catalog = catalog();
    let selector = TeamSelector::default().select(SelectorLevel::Team, 1, &catalog);
    assert_eq!(selector.candidate.as_ref().map(|t| t.id), Some(61));
    assert_eq!(selector.current_index(SelectorLevel::Team, &catalog), Some(1));
}

#[test]
fn commit_adds_new_candidate_and_resets() {
    let catalog = catalog();
    let selector = TeamSelector::default().select(SelectorLevel::Team, 1, &catalog);

    let (selection, reset) = selector.commit(&TeamSelection::new());
    assert_eq!(selection.len(), 1);
    assert_eq!(selection.teams()[0].short_name, "Chelsea");
    assert_eq!(reset, TeamSelector::default());
}

#[test]
fn commit_of_already_selected_team_leaves_selection_unchanged() {
    let existing = TeamSelection::new().add(&default_team());
    let (selection, reset) = TeamSelector::default().commit(&existing);
    assert_eq!(selection, existing);
    assert_eq!(reset, TeamSelector::default());
}

#[test]
fn cancel_resets_every_level() {
    let catalog = catalog();
    let moved = TeamSelector::default()
        .select(SelectorLevel::Country, 2, &catalog)
        .select(SelectorLevel::Team, 0, &catalog);
    assert_ne!(moved, TeamSelector::default());
    assert_eq!(moved.cancel(), TeamSelector::default());
}

#[test]
fn empty_catalog_never_panics_and_commit_is_a_no_op() {
    let catalog: Vec<Team> = Vec::new();
    let selector = TeamSelector::default().select(SelectorLevel::Country, 3, &catalog);

    assert_eq!(selector.country, "Italy");
    assert_eq!(selector.league, None);
    assert_eq!(selector.candidate, None);
    assert!(selector.team_options(&catalog).is_empty());
    assert_eq!(selector.option_count(SelectorLevel::Team, &catalog), 0);
    assert_eq!(selector.option_count(SelectorLevel::Country, &catalog), 4);
    assert_eq!(selector.option_count(SelectorLevel::League, &catalog), 1);

    let selector = selector
        .select(SelectorLevel::League, 0, &catalog)
        .select(SelectorLevel::Team, 0, &catalog);
    assert_eq!(selector.league.as_deref(), Some("Serie A"));
    assert_eq!(selector.candidate, None);

    let before = TeamSelection::new();
    let (after, reset) = selector.commit(&before);
    assert_eq!(after, before);
    assert_eq!(reset, TeamSelector::default());
}

#[test]
fn default_candidate_commits_even_without_catalog() {
    let (selection, _) = TeamSelector::default().commit(&TeamSelection::new());
    assert_eq!(selection.teams(), &[default_team()]);
}
