use crate::state::{LeagueOption, Team};

/// Ordered set of the user's teams. No two entries share an id.
///
/// Treated as a value: every operation returns a fresh set, so callers detect
/// change by comparing the old and new values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamSelection {
    teams: Vec<Team>,
}

impl TeamSelection {
    pub fn new() -> Self {
        Self { teams: Vec::new() }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Team> {
        self.teams.iter()
    }

    pub fn contains_id(&self, id: i64) -> bool {
        self.teams.iter().any(|t| t.id == id)
    }

    /// Appends `team` unless a team with the same id is already present.
    pub fn add(&self, team: &Team) -> Self {
        if self.contains_id(team.id) {
            return self.clone();
        }
        let mut teams = Vec::with_capacity(self.teams.len() + 1);
        teams.extend(self.teams.iter().cloned());
        teams.push(team.clone());
        Self { teams }
    }

    /// Drops every team whose short name equals `short_name`.
    pub fn remove(&self, short_name: &str) -> Self {
        Self {
            teams: self
                .teams
                .iter()
                .filter(|t| t.short_name != short_name)
                .cloned()
                .collect(),
        }
    }

    pub fn reset() -> Self {
        Self::new()
    }

    /// Selected teams bucketed under each league option, in option order.
    /// Options without a selected team are omitted; teams whose league matches
    /// no option are not listed.
    pub fn by_league<'a>(
        &'a self,
        options: &'a [LeagueOption],
    ) -> Vec<(&'a LeagueOption, Vec<&'a Team>)> {
        options
            .iter()
            .filter_map(|option| {
                let teams: Vec<&Team> = self
                    .teams
                    .iter()
                    .filter(|t| t.league == option.league)
                    .collect();
                (!teams.is_empty()).then_some((option, teams))
            })
            .collect()
    }
}

impl FromIterator<Team> for TeamSelection {
    fn from_iter<I: IntoIterator<Item = Team>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |selection, team| selection.add(&team))
    }
}

impl<'a> IntoIterator for &'a TeamSelection {
    type Item = &'a Team;
    type IntoIter = std::slice::Iter<'a, Team>;

    fn into_iter(self) -> Self::IntoIter {
        self.teams.iter()
    }
}
