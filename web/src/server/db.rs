//! SQLite store for the species catalog.
//!
//! One table, opened per call with a busy timeout.  WAL journal mode is set
//! once by [`ensure_schema`] at startup; the mode persists in the file, so
//! later connections inherit it without needing a write.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::info;

use fieldguide_common::{Kingdom, Species, SpeciesPatch};

/// Store failure: either SQLite itself, or an update that matched no row.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("no species with id {0}")]
    NotFound(i64),
}

fn open(db_path: &Path) -> Result<Connection, rusqlite::Error> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA busy_timeout=3000;")?;
    Ok(conn)
}

// ─── Schema ──────────────────────────────────────────────────────────────────

/// Create the `species` table if missing and seed demo records on first run.
pub fn ensure_schema(db_path: &Path) -> Result<(), StoreError> {
    let conn = open(db_path)?;
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         CREATE TABLE IF NOT EXISTS species (
             id               INTEGER PRIMARY KEY AUTOINCREMENT,
             scientific_name  TEXT NOT NULL,
             common_name      TEXT,
             kingdom          TEXT NOT NULL,
             total_population INTEGER,
             image            TEXT,
             description      TEXT,
             author           TEXT NOT NULL,
             updated_at       TEXT
         );",
    )?;

    let count: i64 = conn.query_row("SELECT COUNT(*) FROM species", [], |row| row.get(0))?;
    if count == 0 {
        seed(&conn)?;
        info!("Seeded species catalog at {}", db_path.display());
    }
    Ok(())
}

/// Demo records with two distinct authors, so the owner-only edit affordance
/// is visible out of the box.
fn seed(conn: &Connection) -> Result<(), rusqlite::Error> {
    let rows: [(&str, Option<&str>, Kingdom, Option<i64>, Option<&str>, &str); 4] = [
        (
            "Turdus merula",
            Some("Eurasian Blackbird"),
            Kingdom::Animalia,
            Some(162_000_000),
            Some("A true thrush, common across Europe; males are all black with a yellow eye-ring."),
            "demo-user",
        ),
        (
            "Amanita muscaria",
            Some("Fly Agaric"),
            Kingdom::Fungi,
            None,
            Some("The iconic red-and-white toadstool of fairy tales."),
            "demo-user",
        ),
        (
            "Quercus robur",
            Some("English Oak"),
            Kingdom::Plantae,
            None,
            Some("Long-lived deciduous oak, keystone of European broadleaf forests."),
            "field-team",
        ),
        (
            "Thermus aquaticus",
            None,
            Kingdom::Bacteria,
            None,
            Some("Thermophile first isolated from Yellowstone hot springs; source of Taq polymerase."),
            "field-team",
        ),
    ];

    for (sci, common, kingdom, population, description, author) in rows {
        conn.execute(
            "INSERT INTO species \
             (scientific_name, common_name, kingdom, total_population, image, description, author) \
             VALUES (?1, ?2, ?3, ?4, NULL, ?5, ?6)",
            params![sci, common, kingdom.as_str(), population, description, author],
        )?;
    }
    Ok(())
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Full record snapshots, newest first.
pub fn list_species(db_path: &Path) -> Result<Vec<Species>, StoreError> {
    let conn = open(db_path)?;
    let mut stmt = conn.prepare(
        "SELECT id, scientific_name, common_name, kingdom, total_population, \
         image, description, author, updated_at \
         FROM species ORDER BY id DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        let kingdom: String = row.get(3)?;
        let kingdom = kingdom.parse::<Kingdom>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;
        Ok(Species {
            id: row.get(0)?,
            scientific_name: row.get(1)?,
            common_name: row.get(2)?,
            kingdom,
            total_population: row.get(4)?,
            image: row.get(5)?,
            description: row.get(6)?,
            author: row.get(7)?,
            updated_at: row.get(8)?,
        })
    })?;

    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Rewrite all editable fields of the record with `id`.
///
/// `id` and `author` are never touched; `updated_at` is stamped here.
/// Matching no row is an error so the caller can surface it.
pub fn update_species(db_path: &Path, id: i64, patch: &SpeciesPatch) -> Result<(), StoreError> {
    let conn = open(db_path)?;
    let updated_at = chrono::Utc::now().to_rfc3339();

    let changed = conn.execute(
        "UPDATE species SET \
         scientific_name = ?1, common_name = ?2, kingdom = ?3, \
         total_population = ?4, image = ?5, description = ?6, updated_at = ?7 \
         WHERE id = ?8",
        params![
            patch.scientific_name,
            patch.common_name,
            patch.kingdom.as_str(),
            patch.total_population,
            patch.image,
            patch.description,
            updated_at,
            id
        ],
    )?;

    if changed == 0 {
        return Err(StoreError::NotFound(id));
    }
    info!("Updated species {id} ({})", patch.scientific_name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_db(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("fieldguide_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{name}.db"));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_schema_seeds_once() {
        let db = temp_db("seeds_once");
        ensure_schema(&db).unwrap();
        let first = list_species(&db).unwrap();
        assert!(!first.is_empty());

        ensure_schema(&db).unwrap();
        let second = list_species(&db).unwrap();
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn test_update_rewrites_fields_and_keeps_author() {
        let db = temp_db("update_fields");
        ensure_schema(&db).unwrap();
        let before = list_species(&db).unwrap();
        let target = before.last().unwrap().clone();

        let patch = SpeciesPatch {
            scientific_name: "Turdus merula merula".into(),
            common_name: Some("Common Blackbird".into()),
            kingdom: Kingdom::Animalia,
            total_population: Some(165_000_000),
            image: Some("https://example.org/blackbird.jpg".into()),
            description: None,
        };
        update_species(&db, target.id, &patch).unwrap();

        let after = list_species(&db).unwrap();
        let updated = after.iter().find(|s| s.id == target.id).unwrap();
        assert_eq!(updated.scientific_name, "Turdus merula merula");
        assert_eq!(updated.common_name.as_deref(), Some("Common Blackbird"));
        assert_eq!(updated.total_population, Some(165_000_000));
        assert_eq!(updated.description, None);
        assert_eq!(updated.author, target.author);
        assert!(updated.updated_at.is_some());
    }

    #[test]
    fn test_update_unknown_id_is_an_error() {
        let db = temp_db("unknown_id");
        ensure_schema(&db).unwrap();

        let patch = SpeciesPatch {
            scientific_name: "Nemo nusquam".into(),
            common_name: None,
            kingdom: Kingdom::Animalia,
            total_population: None,
            image: None,
            description: None,
        };
        let err = update_species(&db, 9999, &patch).unwrap_err();
        assert!(err.to_string().contains("9999"));
    }
}
