use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use uuid::Uuid;

pub mod models;
pub mod store;

use models::*;
pub use store::PlayerStore;

/// Failures raised by the SQLite layer. Never retried here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database connection lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Thread-safe SQLite handle (single connection with mutex)
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the SQLite database at the given path
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::from_connection(conn)
    }

    /// Private in-memory database, used by tests
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let db = Database {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Run schema migrations (idempotent)
    fn run_migrations(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    // ── Players ───────────────────────────────────────────────────────────────

    /// Insert a new player with a fresh UUID and return the stored row
    pub fn insert_player(&self, new: &NewPlayer) -> Result<Player> {
        let conn = self.lock()?;
        let id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO players (id, name, sport, matches, score, assists, rebounds, wins)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
            params![
                id,
                new.name.trim(),
                new.sport.trim(),
                new.matches,
                new.score,
                new.assists,
                new.rebounds,
                new.wins,
            ],
        )?;
        select_player(&conn, &id)?.ok_or(StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Fetch one player by id
    pub fn get_player(&self, id: &str) -> Result<Option<Player>> {
        let conn = self.lock()?;
        select_player(&conn, id)
    }

    /// List players ordered by name, optionally restricted to one sport
    pub fn list_players(&self, sport: Option<&str>) -> Result<Vec<Player>> {
        let conn = self.lock()?;
        let players = match sport {
            Some(sport) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {PLAYER_COLUMNS} FROM players WHERE sport=?1 ORDER BY name, id"
                ))?;
                let rows = stmt
                    .query_map(params![sport], map_player)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {PLAYER_COLUMNS} FROM players ORDER BY name, id"
                ))?;
                let rows = stmt
                    .query_map([], map_player)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };
        Ok(players)
    }

    /// Fetch every player whose id is in `ids`. Row order is unspecified.
    pub fn find_players_by_ids(&self, ids: &[&str]) -> Result<Vec<Player>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.lock()?;
        let placeholders = (1..=ids.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(",");
        let mut stmt = conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE id IN ({placeholders})"
        ))?;
        let players = stmt
            .query_map(params_from_iter(ids.iter()), map_player)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(players)
    }

    /// Apply `update` to the stored player. Returns `None` when the id is unknown.
    pub fn update_player(&self, id: &str, update: &PlayerUpdate) -> Result<Option<Player>> {
        let conn = self.lock()?;
        let Some(current) = select_player(&conn, id)? else {
            return Ok(None);
        };
        if update.is_empty() {
            return Ok(Some(current));
        }
        let next = update.apply(&current);
        conn.execute(
            "UPDATE players SET name=?1, sport=?2, matches=?3, score=?4,
                                assists=?5, rebounds=?6, wins=?7
             WHERE id=?8",
            params![
                next.name.trim(),
                next.sport.trim(),
                next.matches,
                next.score,
                next.assists,
                next.rebounds,
                next.wins,
                id,
            ],
        )?;
        select_player(&conn, id)
    }

    /// Delete a player. Returns whether a row was removed.
    pub fn delete_player(&self, id: &str) -> Result<bool> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM players WHERE id=?1", params![id])?;
        Ok(removed > 0)
    }

    pub fn count_players(&self) -> Result<i64> {
        let conn = self.lock()?;
        let count = conn.query_row("SELECT COUNT(*) FROM players", [], |r| r.get(0))?;
        Ok(count)
    }
}

// ── SQL helpers ────────────────────────────────────────────────────────────────

const PLAYER_COLUMNS: &str =
    "id, name, sport, matches, score, assists, rebounds, wins, created_at, updated_at";

fn select_player(conn: &Connection, id: &str) -> Result<Option<Player>> {
    let player = conn
        .query_row(
            &format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id=?1"),
            params![id],
            map_player,
        )
        .optional()?;
    Ok(player)
}

fn map_player(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        sport: row.get(2)?,
        matches: row.get(3)?,
        score: row.get(4)?,
        assists: row.get(5)?,
        rebounds: row.get(6)?,
        wins: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// SQLite schema (idempotent CREATE IF NOT EXISTS)
///
/// Timestamps are UTC, written by SQLite itself so that every mutation path
/// (including ones outside this binary) refreshes `updated_at`.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS players (
    id          TEXT    PRIMARY KEY,
    name        TEXT    NOT NULL,
    sport       TEXT    NOT NULL,
    matches     INTEGER NOT NULL DEFAULT 0 CHECK (matches >= 0),
    score       INTEGER NOT NULL DEFAULT 0 CHECK (score >= 0),
    assists     INTEGER NOT NULL DEFAULT 0 CHECK (assists >= 0),
    rebounds    INTEGER NOT NULL DEFAULT 0 CHECK (rebounds >= 0),
    wins        INTEGER NOT NULL DEFAULT 0 CHECK (wins >= 0),
    created_at  TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
    updated_at  TEXT    NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_players_sport ON players(sport);

CREATE TRIGGER IF NOT EXISTS trg_players_updated_at
AFTER UPDATE ON players
FOR EACH ROW
BEGIN
    UPDATE players SET updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now') WHERE id = NEW.id;
END;
"#;

/// Sample roster inserted by `--seed-demo` on an empty table
pub fn demo_players() -> Vec<NewPlayer> {
    vec![
        NewPlayer {
            matches: 20,
            score: 480,
            assists: 110,
            rebounds: 95,
            wins: 14,
            ..NewPlayer::new("Maya Carter", "basketball")
        },
        NewPlayer {
            matches: 18,
            score: 260,
            assists: 190,
            rebounds: 70,
            wins: 9,
            ..NewPlayer::new("Luis Ortega", "basketball")
        },
        NewPlayer {
            matches: 22,
            score: 210,
            assists: 60,
            rebounds: 305,
            wins: 12,
            ..NewPlayer::new("Tomasz Nowak", "basketball")
        },
        NewPlayer {
            matches: 30,
            score: 18,
            assists: 11,
            rebounds: 0,
            wins: 19,
            ..NewPlayer::new("Aiko Tanaka", "soccer")
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().expect("in-memory db")
    }

    fn sample(name: &str, sport: &str) -> NewPlayer {
        NewPlayer {
            matches: 10,
            score: 120,
            assists: 30,
            rebounds: 40,
            wins: 8,
            ..NewPlayer::new(name, sport)
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let db = db();
        let created = db.insert_player(&sample("Ana", "basketball")).unwrap();
        assert!(!created.id.is_empty());

        let fetched = db.get_player(&created.id).unwrap().expect("stored");
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Ana");
        assert_eq!(fetched.matches, 10);
        assert_eq!(fetched.score, 120);
        assert_eq!(fetched.assists, 30);
        assert_eq!(fetched.rebounds, 40);
        assert_eq!(fetched.wins, 8);
    }

    #[test]
    fn get_unknown_player_is_none() {
        assert!(db().get_player("missing").unwrap().is_none());
    }

    #[test]
    fn migrations_are_idempotent() {
        let db = db();
        db.run_migrations().unwrap();
        db.run_migrations().unwrap();
        assert_eq!(db.count_players().unwrap(), 0);
    }

    #[test]
    fn wins_above_matches_is_accepted() {
        let db = db();
        let p = NewPlayer {
            matches: 2,
            wins: 5,
            ..NewPlayer::new("Odd", "soccer")
        };
        let created = db.insert_player(&p).unwrap();
        assert_eq!(created.wins, 5);
        assert_eq!(created.matches, 2);
    }

    #[test]
    fn list_filters_by_sport_and_orders_by_name() {
        let db = db();
        db.insert_player(&sample("Zed", "basketball")).unwrap();
        db.insert_player(&sample("Amy", "basketball")).unwrap();
        db.insert_player(&sample("Kai", "soccer")).unwrap();

        let all = db.list_players(None).unwrap();
        let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Kai", "Zed"]);

        let hoops = db.list_players(Some("basketball")).unwrap();
        assert_eq!(hoops.len(), 2);
        assert!(hoops.iter().all(|p| p.sport == "basketball"));

        assert!(db.list_players(Some("cricket")).unwrap().is_empty());
    }

    #[test]
    fn find_by_ids_returns_only_requested_rows() {
        let db = db();
        let a = db.insert_player(&sample("A", "basketball")).unwrap();
        let b = db.insert_player(&sample("B", "basketball")).unwrap();
        db.insert_player(&sample("C", "basketball")).unwrap();

        let found = db.find_players_by_ids(&[a.id.as_str(), b.id.as_str()]).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|p| p.id == a.id));
        assert!(found.iter().any(|p| p.id == b.id));

        let one = db.find_players_by_ids(&[a.id.as_str(), "missing"]).unwrap();
        assert_eq!(one.len(), 1);

        let repeated = db.find_players_by_ids(&[a.id.as_str(), a.id.as_str()]).unwrap();
        assert_eq!(repeated.len(), 1);

        assert!(db.find_players_by_ids(&[]).unwrap().is_empty());
    }

    #[test]
    fn update_keeps_untouched_fields_and_refreshes_timestamp() {
        let db = db();
        let created = db.insert_player(&sample("Ana", "basketball")).unwrap();

        let update = PlayerUpdate {
            score: Some(200),
            ..Default::default()
        };
        let updated = db.update_player(&created.id, &update).unwrap().expect("exists");
        assert_eq!(updated.score, 200);
        assert_eq!(updated.assists, created.assists);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn update_unknown_player_is_none() {
        let update = PlayerUpdate {
            wins: Some(1),
            ..Default::default()
        };
        assert!(db().update_player("missing", &update).unwrap().is_none());
    }

    #[test]
    fn delete_removes_row() {
        let db = db();
        let created = db.insert_player(&sample("Ana", "basketball")).unwrap();
        assert!(db.delete_player(&created.id).unwrap());
        assert!(!db.delete_player(&created.id).unwrap());
        assert_eq!(db.count_players().unwrap(), 0);
    }

    #[test]
    fn demo_roster_inserts_cleanly() {
        let db = db();
        for p in demo_players() {
            db.insert_player(&p).unwrap();
        }
        assert_eq!(db.count_players().unwrap(), demo_players().len() as i64);
    }
}
