use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::schedule::{self, GroupedFixtures};
use crate::selection::TeamSelection;
use crate::selector::{SelectorLevel, TeamSelector};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub short_name: String,
    pub tla: String,
    pub crest: String,
    pub club_colors: String,
    // Country name.
    pub area: String,
    pub league: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub id: i64,
    pub competition: String,
    /// Kickoff as delivered by the provider; parsed lazily by `schedule`.
    pub kickoff: String,
    pub home_team: String,
    pub away_team: String,
    pub status: String,
    /// The selected team this fixture was fetched for.
    pub selected_team: Team,
    pub is_home: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueOption {
    pub id: u32,
    pub area: &'static str,
    pub league: &'static str,
}

/// Leagues offered by the team selector. Fixed configuration, independent of
/// whatever the provider's catalog actually contains.
pub const LEAGUE_OPTIONS: [LeagueOption; 4] = [
    LeagueOption {
        id: 1,
        area: "England",
        league: "Premier League",
    },
    LeagueOption {
        id: 2,
        area: "Spain",
        league: "Primera Division",
    },
    LeagueOption {
        id: 3,
        area: "Germany",
        league: "Bundesliga",
    },
    LeagueOption {
        id: 4,
        area: "Italy",
        league: "Serie A",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Schedule,
    Customize,
    Register,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub selection: TeamSelection,
    pub fixtures: GroupedFixtures,
    pub catalog: Vec<Team>,
    pub selector: TeamSelector,
    pub schedule_scroll: u16,
    pub customize_selected: usize,
    pub focus_level: SelectorLevel,
    pub fixtures_request: u64,
    pub fixtures_loading: bool,
    pub catalog_request: u64,
    pub catalog_loading: bool,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Schedule,
            selection: TeamSelection::new(),
            fixtures: GroupedFixtures::new(),
            catalog: Vec::new(),
            selector: TeamSelector::default(),
            schedule_scroll: 0,
            customize_selected: 0,
            focus_level: SelectorLevel::Country,
            fixtures_request: 0,
            fixtures_loading: false,
            catalog_request: 0,
            catalog_loading: false,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        if self.logs.len() >= MAX_LOGS {
            self.logs.pop_front();
        }
        self.logs.push_back(line.into());
    }

    /// Issues a fixtures request for the current selection. Responses tagged
    /// with any older id are dropped by `apply_delta`.
    pub fn fixtures_command(&mut self) -> ProviderCommand {
        self.fixtures_request = self.fixtures_request.wrapping_add(1);
        self.fixtures_loading = true;
        ProviderCommand::FetchFixtures {
            request_id: self.fixtures_request,
            teams: self.selection.teams().to_vec(),
        }
    }

    pub fn catalog_command(&mut self) -> ProviderCommand {
        self.catalog_request = self.catalog_request.wrapping_add(1);
        self.catalog_loading = true;
        ProviderCommand::FetchCatalog {
            request_id: self.catalog_request,
        }
    }

    /// Replaces the selection wholesale. Returns true when it actually changed,
    /// which is the caller's cue to refetch fixtures.
    pub fn replace_selection(&mut self, next: TeamSelection) -> bool {
        if next == self.selection {
            return false;
        }
        self.selection = next;
        let len = self.customize_rows().len();
        if self.customize_selected >= len {
            self.customize_selected = len.saturating_sub(1);
        }
        true
    }

    pub fn open_customize(&mut self) {
        self.screen = Screen::Customize;
        self.customize_selected = 0;
    }

    pub fn close_customize(&mut self) {
        self.screen = Screen::Schedule;
    }

    pub fn open_register(&mut self) {
        self.screen = Screen::Register;
        self.focus_level = SelectorLevel::Country;
    }

    /// Moves the focused selector level one slot left or right, wrapping like
    /// a carousel.
    pub fn step_selector(&mut self, forward: bool) {
        let len = self.selector.option_count(self.focus_level, &self.catalog);
        if len == 0 {
            return;
        }
        let current = self
            .selector
            .current_index(self.focus_level, &self.catalog)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.selector = self.selector.select(self.focus_level, next, &self.catalog);
    }

    pub fn cycle_focus_level(&mut self) {
        self.focus_level = self.focus_level.next();
    }

    /// Commits the candidate team and closes the register dialog. Returns true
    /// when the selection changed.
    pub fn commit_selector(&mut self) -> bool {
        let (selection, selector) = self.selector.commit(&self.selection);
        self.selector = selector;
        self.screen = Screen::Customize;
        self.replace_selection(selection)
    }

    pub fn cancel_selector(&mut self) {
        self.selector = self.selector.cancel();
        self.screen = Screen::Customize;
    }

    /// Selected teams in customize-view order (grouped by league option).
    pub fn customize_rows(&self) -> Vec<&Team> {
        self.selection
            .by_league(&LEAGUE_OPTIONS)
            .into_iter()
            .flat_map(|(_, teams)| teams)
            .collect()
    }

    /// Removes the highlighted team in the customize view. Returns true when
    /// the selection changed.
    pub fn remove_highlighted(&mut self) -> bool {
        let Some(short_name) = self
            .customize_rows()
            .get(self.customize_selected)
            .map(|team| team.short_name.clone())
        else {
            return false;
        };
        let next = self.selection.remove(&short_name);
        let changed = self.replace_selection(next);
        if changed {
            self.push_log(format!("[INFO] Removed {short_name}"));
        }
        changed
    }

    pub fn select_next(&mut self) {
        match self.screen {
            Screen::Schedule => {
                self.schedule_scroll = self.schedule_scroll.saturating_add(1);
            }
            Screen::Customize => {
                let len = self.customize_rows().len();
                if len > 0 {
                    self.customize_selected = (self.customize_selected + 1).min(len - 1);
                }
            }
            Screen::Register => self.cycle_focus_level(),
        }
    }

    pub fn select_prev(&mut self) {
        match self.screen {
            Screen::Schedule => {
                self.schedule_scroll = self.schedule_scroll.saturating_sub(1);
            }
            Screen::Customize => {
                self.customize_selected = self.customize_selected.saturating_sub(1);
            }
            Screen::Register => self.focus_level = self.focus_level.prev(),
        }
    }

    pub fn fixture_count(&self) -> usize {
        self.fixtures.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetFixtures {
        request_id: u64,
        fixtures: Vec<Fixture>,
    },
    FixturesFailed {
        request_id: u64,
        error: String,
    },
    SetCatalog {
        request_id: u64,
        teams: Vec<Team>,
    },
    CatalogFailed {
        request_id: u64,
        error: String,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchFixtures { request_id: u64, teams: Vec<Team> },
    FetchCatalog { request_id: u64 },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetFixtures {
            request_id,
            fixtures,
        } => {
            if request_id != state.fixtures_request {
                state.push_log(format!(
                    "[INFO] Dropped stale fixtures response #{request_id}"
                ));
                return;
            }
            state.fixtures_loading = false;
            state.fixtures = schedule::group_fixtures(fixtures);
            let max_scroll = state.fixture_count() + state.fixtures.len();
            state.schedule_scroll = state.schedule_scroll.min(max_scroll as u16);
        }
        Delta::FixturesFailed { request_id, error } => {
            // Previous grouped view stays on screen.
            if request_id == state.fixtures_request {
                state.fixtures_loading = false;
            }
            state.push_log(format!("[WARN] Failed to fetch fixtures: {error}"));
        }
        Delta::SetCatalog { request_id, teams } => {
            if request_id != state.catalog_request {
                state.push_log(format!(
                    "[INFO] Dropped stale catalog response #{request_id}"
                ));
                return;
            }
            state.catalog_loading = false;
            state.push_log(format!("[INFO] Catalog loaded ({} teams)", teams.len()));
            state.catalog = teams;
        }
        Delta::CatalogFailed { request_id, error } => {
            if request_id == state.catalog_request {
                state.catalog_loading = false;
            }
            state.push_log(format!("[WARN] Failed to fetch teams: {error}"));
        }
        Delta::Log(line) => state.push_log(line),
    }
}

pub fn screen_label(screen: Screen) -> &'static str {
    match screen {
        Screen::Schedule => "SCHEDULE",
        Screen::Customize => "CUSTOMIZE",
        Screen::Register => "ADD TEAM",
    }
}
