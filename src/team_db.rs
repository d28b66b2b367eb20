use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, Row, params};

use crate::football_data::TIMED_STATUS;
use crate::provider::ScheduleProvider;
use crate::state::{Fixture, Team};

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS teams (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            short_name TEXT NOT NULL,
            tla TEXT NOT NULL DEFAULT '',
            crest TEXT NOT NULL DEFAULT '',
            area TEXT NOT NULL,
            league TEXT NOT NULL,
            club_colors TEXT NOT NULL DEFAULT ''
        );
        CREATE TABLE IF NOT EXISTS fixtures (
            id INTEGER PRIMARY KEY,
            competition TEXT NOT NULL,
            date TEXT NOT NULL,
            home_team TEXT NOT NULL,
            away_team TEXT NOT NULL,
            status TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_fixtures_home ON fixtures(home_team);
        CREATE INDEX IF NOT EXISTS idx_fixtures_away ON fixtures(away_team);
        CREATE INDEX IF NOT EXISTS idx_fixtures_date ON fixtures(date);
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

pub fn load_teams(conn: &Connection) -> Result<Vec<Team>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, name, short_name, tla, crest, area, league, club_colors
             FROM teams",
        )
        .context("prepare teams query")?;
    let rows = stmt
        .query_map([], team_from_row)
        .context("query teams")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("read team rows")?;
    Ok(rows)
}

/// Scheduled fixtures where `team` plays home or away, matched on short name.
pub fn load_fixtures_for_team(conn: &Connection, team: &Team) -> Result<Vec<Fixture>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, competition, date, home_team, away_team, status
             FROM fixtures
             WHERE (home_team = ?1 OR away_team = ?1)
               AND status = ?2
             ORDER BY date ASC",
        )
        .context("prepare fixtures query")?;
    let rows = stmt
        .query_map(params![team.short_name, TIMED_STATUS], |row| {
            let home_team: String = row.get("home_team")?;
            Ok(Fixture {
                id: row.get("id")?,
                competition: row.get("competition")?,
                kickoff: row.get("date")?,
                is_home: home_team == team.short_name,
                home_team,
                away_team: row.get("away_team")?,
                status: row.get("status")?,
                selected_team: team.clone(),
            })
        })
        .with_context(|| format!("query fixtures for {}", team.short_name))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("read fixture rows")?;
    Ok(rows)
}

/// One batch per team, concatenated in selection order.
pub fn load_fixtures(conn: &Connection, teams: &[Team]) -> Result<Vec<Fixture>> {
    let mut out = Vec::new();
    for team in teams {
        out.extend(load_fixtures_for_team(conn, team)?);
    }
    Ok(out)
}

pub fn upsert_teams(conn: &mut Connection, teams: &[Team]) -> Result<usize> {
    let tx = conn.transaction().context("begin teams tx")?;
    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO teams (id, name, short_name, tla, crest, area, league, club_colors)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    short_name = excluded.short_name,
                    tla = excluded.tla,
                    crest = excluded.crest,
                    area = excluded.area,
                    league = excluded.league,
                    club_colors = excluded.club_colors",
            )
            .context("prepare team upsert")?;
        for t in teams {
            stmt.execute(params![
                t.id,
                t.name,
                t.short_name,
                t.tla,
                t.crest,
                t.area,
                t.league,
                t.club_colors
            ])
            .with_context(|| format!("upsert team {}", t.id))?;
        }
    }
    tx.commit().context("commit teams tx")?;
    Ok(teams.len())
}

pub fn upsert_fixtures(conn: &mut Connection, fixtures: &[Fixture]) -> Result<usize> {
    let tx = conn.transaction().context("begin fixtures tx")?;
    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO fixtures (id, competition, date, home_team, away_team, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(id) DO UPDATE SET
                    competition = excluded.competition,
                    date = excluded.date,
                    home_team = excluded.home_team,
                    away_team = excluded.away_team,
                    status = excluded.status",
            )
            .context("prepare fixture upsert")?;
        for f in fixtures {
            stmt.execute(params![
                f.id,
                f.competition,
                f.kickoff,
                f.home_team,
                f.away_team,
                f.status
            ])
            .with_context(|| format!("upsert fixture {}", f.id))?;
        }
    }
    tx.commit().context("commit fixtures tx")?;
    Ok(fixtures.len())
}

fn team_from_row(row: &Row<'_>) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get("id")?,
        name: row.get("name")?,
        short_name: row.get("short_name")?,
        tla: row.get("tla")?,
        crest: row.get("crest")?,
        club_colors: row.get("club_colors")?,
        area: row.get("area")?,
        league: row.get("league")?,
    })
}

pub struct SqliteProvider {
    conn: Connection,
}

impl SqliteProvider {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(open_db(path)?))
    }
}

impl ScheduleProvider for SqliteProvider {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn fetch_teams(&self) -> Result<Vec<Team>> {
        load_teams(&self.conn)
    }

    fn fetch_fixtures(&self, teams: &[Team]) -> Result<Vec<Fixture>> {
        load_fixtures(&self.conn, teams)
    }
}
