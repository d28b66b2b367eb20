//! Country -> league -> team cascade used by the add-team dialog.
//!
//! Every transition is a pure `(state, level, index) -> state` step; the
//! widget that shows the option lists only reports index changes.
//!
//! The derivations below intentionally mirror the shipped behaviour:
//! - a country change takes its league from the first *catalog* team in that
//!   country, while the league list shown is built from `LEAGUE_OPTIONS`;
//! - a league change picks the first catalog team of that league without
//!   filtering by the current country.
//!
//! Either can leave the candidate pointing at a team that is not in any visible
//! list. That is tolerated; commit uses whatever the candidate holds.

use crate::selection::TeamSelection;
use crate::state::{LEAGUE_OPTIONS, Team};

pub const DEFAULT_COUNTRY: &str = "England";
pub const DEFAULT_LEAGUE: &str = "Premier League";

pub fn default_team() -> Team {
    Team {
        id: 57,
        name: "Arsenal FC".to_string(),
        short_name: "Arsenal".to_string(),
        tla: String::new(),
        crest: String::new(),
        club_colors: String::new(),
        area: DEFAULT_COUNTRY.to_string(),
        league: DEFAULT_LEAGUE.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorLevel {
    Country,
    League,
    Team,
}

impl SelectorLevel {
    pub fn next(self) -> Self {
        match self {
            SelectorLevel::Country => SelectorLevel::League,
            SelectorLevel::League => SelectorLevel::Team,
            SelectorLevel::Team => SelectorLevel::Country,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SelectorLevel::Country => SelectorLevel::Team,
            SelectorLevel::League => SelectorLevel::Country,
            SelectorLevel::Team => SelectorLevel::League,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SelectorLevel::Country => "Country",
            SelectorLevel::League => "League",
            SelectorLevel::Team => "Team",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSelector {
    pub country: String,
    /// `None` once a country change finds no catalog team for that country.
    pub league: Option<String>,
    /// Highlighted, not yet committed.
    pub candidate: Option<Team>,
}

impl Default for TeamSelector {
    fn default() -> Self {
        Self {
            country: DEFAULT_COUNTRY.to_string(),
            league: Some(DEFAULT_LEAGUE.to_string()),
            candidate: Some(default_team()),
        }
    }
}

/// Distinct countries of the static league table, first-seen order.
pub fn country_options() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::with_capacity(LEAGUE_OPTIONS.len());
    for option in &LEAGUE_OPTIONS {
        if !out.contains(&option.area) {
            out.push(option.area);
        }
    }
    out
}

/// Distinct leagues of the static league table for `country`.
pub fn league_options(country: &str) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for option in LEAGUE_OPTIONS.iter().filter(|o| o.area == country) {
        if !out.contains(&option.league) {
            out.push(option.league);
        }
    }
    out
}

/// Catalog teams playing in `country` and `league`, catalog order.
pub fn team_options<'a>(catalog: &'a [Team], country: &str, league: Option<&str>) -> Vec<&'a Team> {
    let Some(league) = league else {
        return Vec::new();
    };
    catalog
        .iter()
        .filter(|t| t.area == country)
        .filter(|t| t.league == league)
        .collect()
}

impl TeamSelector {
    pub fn league_options(&self) -> Vec<&'static str> {
        league_options(&self.country)
    }

    pub fn team_options<'a>(&self, catalog: &'a [Team]) -> Vec<&'a Team> {
        team_options(catalog, &self.country, self.league.as_deref())
    }

    /// Applies "the `level` control moved to `index`". An index outside the
    /// visible list for that level leaves the state unchanged.
    pub fn select(&self, level: SelectorLevel, index: usize, catalog: &[Team]) -> Self {
        match level {
            SelectorLevel::Country => {
                let Some(country) = country_options().get(index).copied() else {
                    return self.clone();
                };
                let league = catalog
                    .iter()
                    .find(|t| t.area == country)
                    .map(|t| t.league.clone());
                let candidate = team_options(catalog, country, league.as_deref())
                    .first()
                    .map(|t| (*t).clone());
                Self {
                    country: country.to_string(),
                    league,
                    candidate,
                }
            }
            SelectorLevel::League => {
                let Some(league) = self.league_options().get(index).copied() else {
                    return self.clone();
                };
                let candidate = catalog.iter().find(|t| t.league == league).cloned();
                Self {
                    country: self.country.clone(),
                    league: Some(league.to_string()),
                    candidate,
                }
            }
            SelectorLevel::Team => {
                let Some(team) = self.team_options(catalog).get(index).copied() else {
                    return self.clone();
                };
                Self {
                    country: self.country.clone(),
                    league: self.league.clone(),
                    candidate: Some(team.clone()),
                }
            }
        }
    }

    /// Adds the candidate to `selection` if its id is new, then resets the
    /// cascade. With no candidate the selection is returned unchanged.
    pub fn commit(&self, selection: &TeamSelection) -> (TeamSelection, Self) {
        let next = match &self.candidate {
            Some(team) if !selection.contains_id(team.id) => selection.add(team),
            _ => selection.clone(),
        };
        (next, Self::default())
    }

    pub fn cancel(&self) -> Self {
        Self::default()
    }

    pub fn option_count(&self, level: SelectorLevel, catalog: &[Team]) -> usize {
        match level {
            SelectorLevel::Country => country_options().len(),
            SelectorLevel::League => self.league_options().len(),
            SelectorLevel::Team => self.team_options(catalog).len(),
        }
    }

    /// Position of the current value within the visible list for `level`.
    pub fn current_index(&self, level: SelectorLevel, catalog: &[Team]) -> Option<usize> {
        match level {
            SelectorLevel::Country => country_options().iter().position(|c| *c == self.country),
            SelectorLevel::League => {
                let league = self.league.as_deref()?;
                self.league_options().iter().position(|l| *l == league)
            }
            SelectorLevel::Team => {
                let candidate = self.candidate.as_ref()?;
                self.team_options(catalog)
                    .iter()
                    .position(|t| t.id == candidate.id)
            }
        }
    }

    pub fn option_labels(&self, level: SelectorLevel, catalog: &[Team]) -> Vec<String> {
        match level {
            SelectorLevel::Country => country_options().iter().map(|c| c.to_string()).collect(),
            SelectorLevel::League => self
                .league_options()
                .iter()
                .map(|l| l.to_string())
                .collect(),
            SelectorLevel::Team => self
                .team_options(catalog)
                .iter()
                .map(|t| t.name.clone())
                .collect(),
        }
    }
}
