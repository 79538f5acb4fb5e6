use std::path::Path;

use anyhow::Result;
use rusqlite::{Connection, Transaction};

use crate::parser::model::ParseResult;

pub const DEFAULT_DB_PATH: &str = "data/campaign.sqlite";

pub fn connect(path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            id          INTEGER PRIMARY KEY,
            source      TEXT UNIQUE NOT NULL,
            campaign    TEXT,
            confidence  REAL NOT NULL,
            warnings    TEXT NOT NULL DEFAULT '[]',
            imported_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_documents_campaign ON documents(campaign);

        CREATE TABLE IF NOT EXISTS npcs (
            id          INTEGER PRIMARY KEY,
            document_id INTEGER NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL,
            name        TEXT NOT NULL,
            description TEXT NOT NULL,
            role        TEXT,
            secret      TEXT,
            catchphrase TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_npcs_document ON npcs(document_id);

        CREATE TABLE IF NOT EXISTS encounters (
            id          INTEGER PRIMARY KEY,
            document_id INTEGER NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL,
            name        TEXT NOT NULL,
            description TEXT NOT NULL,
            kind        TEXT NOT NULL CHECK(kind IN ('Combat','Social','Puzzle','Exploration','Unknown')),
            cr          TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_encounters_document ON encounters(document_id);

        CREATE TABLE IF NOT EXISTS revelations (
            id          INTEGER PRIMARY KEY,
            document_id INTEGER NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL,
            title       TEXT NOT NULL,
            description TEXT NOT NULL,
            timing      TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_revelations_document ON revelations(document_id);

        CREATE TABLE IF NOT EXISTS items (
            id          INTEGER PRIMARY KEY,
            document_id INTEGER NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL,
            name        TEXT NOT NULL,
            description TEXT NOT NULL,
            rarity      TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_items_document ON items(document_id);

        CREATE TABLE IF NOT EXISTS quests (
            id          INTEGER PRIMARY KEY,
            document_id INTEGER NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL,
            title       TEXT NOT NULL,
            description TEXT NOT NULL,
            giver       TEXT,
            reward      TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_quests_document ON quests(document_id);

        CREATE TABLE IF NOT EXISTS locations (
            id          INTEGER PRIMARY KEY,
            document_id INTEGER NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL,
            name        TEXT NOT NULL,
            description TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_locations_document ON locations(document_id);

        CREATE TABLE IF NOT EXISTS factions (
            id          INTEGER PRIMARY KEY,
            document_id INTEGER NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL,
            name        TEXT NOT NULL,
            description TEXT NOT NULL,
            reputation  INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_factions_document ON factions(document_id);

        CREATE TABLE IF NOT EXISTS reference_entries (
            id          INTEGER PRIMARY KEY,
            document_id INTEGER NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL,
            kind        TEXT NOT NULL CHECK(kind IN ('mechanics','lore')),
            title       TEXT NOT NULL,
            content     TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_reference_document ON reference_entries(document_id);

        CREATE TABLE IF NOT EXISTS notes (
            id          INTEGER PRIMARY KEY,
            document_id INTEGER NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL,
            body        TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_notes_document ON notes(document_id);
        ",
    )?;
    Ok(())
}

// ── Import ──

pub struct ParsedDocument {
    pub source: String,
    pub result: ParseResult,
}

pub struct SaveCounts {
    pub documents: usize,
    pub entities: usize,
    pub notes: usize,
}

/// Write a batch of parsed documents in one transaction. A source that was
/// imported before has its old rows replaced.
pub fn save_documents(
    conn: &Connection,
    campaign: Option<&str>,
    docs: &[ParsedDocument],
) -> Result<SaveCounts> {
    let tx = conn.unchecked_transaction()?;
    let mut counts = SaveCounts {
        documents: 0,
        entities: 0,
        notes: 0,
    };
    for doc in docs {
        save_one(&tx, campaign, doc)?;
        counts.documents += 1;
        counts.entities += doc.result.total_entities();
        counts.notes += doc.result.notes.len();
    }
    tx.commit()?;
    Ok(counts)
}

pub fn save_document(
    conn: &Connection,
    source: &str,
    campaign: Option<&str>,
    result: &ParseResult,
) -> Result<i64> {
    let tx = conn.unchecked_transaction()?;
    let id = save_one(
        &tx,
        campaign,
        &ParsedDocument {
            source: source.to_string(),
            result: result.clone(),
        },
    )?;
    tx.commit()?;
    Ok(id)
}

fn save_one(tx: &Transaction<'_>, campaign: Option<&str>, doc: &ParsedDocument) -> Result<i64> {
    let r = &doc.result;
    tx.execute("DELETE FROM documents WHERE source = ?1", [&doc.source])?;
    tx.execute(
        "INSERT INTO documents (source, campaign, confidence, warnings, imported_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            doc.source,
            campaign,
            r.confidence,
            serde_json::to_string(&r.warnings)?,
            chrono::Utc::now().to_rfc3339(),
        ],
    )?;
    let id = tx.last_insert_rowid();

    {
        let mut stmt = tx.prepare(
            "INSERT INTO npcs (document_id, position, name, description, role, secret, catchphrase)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for (i, n) in r.npcs.iter().enumerate() {
            stmt.execute(rusqlite::params![
                id, i, n.name, n.description, n.role, n.secret, n.catchphrase,
            ])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO encounters (document_id, position, name, description, kind, cr)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for (i, e) in r.encounters.iter().enumerate() {
            stmt.execute(rusqlite::params![
                id, i, e.name, e.description, e.kind.as_str(), e.cr,
            ])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO revelations (document_id, position, title, description, timing)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for (i, v) in r.revelations.iter().enumerate() {
            stmt.execute(rusqlite::params![id, i, v.title, v.description, v.when])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO items (document_id, position, name, description, rarity)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for (i, it) in r.items.iter().enumerate() {
            stmt.execute(rusqlite::params![
                id, i, it.name, it.description, it.rarity.map(|rarity| rarity.as_str()),
            ])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO quests (document_id, position, title, description, giver, reward)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for (i, q) in r.quests.iter().enumerate() {
            stmt.execute(rusqlite::params![id, i, q.title, q.description, q.giver, q.reward])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO locations (document_id, position, name, description)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (i, l) in r.locations.iter().enumerate() {
            stmt.execute(rusqlite::params![id, i, l.name, l.description])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO factions (document_id, position, name, description, reputation)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for (i, f) in r.factions.iter().enumerate() {
            stmt.execute(rusqlite::params![id, i, f.name, f.description, f.reputation])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO reference_entries (document_id, position, kind, title, content)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        let references = r
            .mechanics
            .iter()
            .map(|e| ("mechanics", e))
            .chain(r.lore.iter().map(|e| ("lore", e)));
        for (i, (kind, e)) in references.enumerate() {
            stmt.execute(rusqlite::params![id, i, kind, e.title, e.content])?;
        }

        let mut stmt =
            tx.prepare("INSERT INTO notes (document_id, position, body) VALUES (?1, ?2, ?3)")?;
        for (i, body) in r.notes.iter().enumerate() {
            stmt.execute(rusqlite::params![id, i, body])?;
        }
    }

    Ok(id)
}

// ── Overview ──

pub struct OverviewRow {
    pub id: i64,
    pub source: String,
    pub campaign: String,
    pub confidence: f64,
    pub npcs: usize,
    pub encounters: usize,
    pub revelations: usize,
    pub items: usize,
    pub quests: usize,
    pub locations: usize,
    pub factions: usize,
    pub notes: usize,
}

pub fn fetch_overview(
    conn: &Connection,
    min_confidence: Option<f64>,
    limit: usize,
) -> Result<Vec<OverviewRow>> {
    let where_clause = if min_confidence.is_some() {
        " WHERE d.confidence >= ?1"
    } else {
        ""
    };
    let sql = format!(
        "SELECT d.id, d.source, COALESCE(d.campaign,''), d.confidence,
                (SELECT COUNT(*) FROM npcs x WHERE x.document_id = d.id),
                (SELECT COUNT(*) FROM encounters x WHERE x.document_id = d.id),
                (SELECT COUNT(*) FROM revelations x WHERE x.document_id = d.id),
                (SELECT COUNT(*) FROM items x WHERE x.document_id = d.id),
                (SELECT COUNT(*) FROM quests x WHERE x.document_id = d.id),
                (SELECT COUNT(*) FROM locations x WHERE x.document_id = d.id),
                (SELECT COUNT(*) FROM factions x WHERE x.document_id = d.id),
                (SELECT COUNT(*) FROM notes x WHERE x.document_id = d.id)
         FROM documents d{}
         ORDER BY d.confidence DESC, d.source
         LIMIT {}",
        where_clause, limit
    );

    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();
    if let Some(min) = min_confidence {
        params.push(Box::new(min));
    }
    let param_refs: Vec<&dyn rusqlite::types::ToSql> = params.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(param_refs.as_slice(), |row| {
            Ok(OverviewRow {
                id: row.get(0)?,
                source: row.get(1)?,
                campaign: row.get(2)?,
                confidence: row.get(3)?,
                npcs: row.get(4)?,
                encounters: row.get(5)?,
                revelations: row.get(6)?,
                items: row.get(7)?,
                quests: row.get(8)?,
                locations: row.get(9)?,
                factions: row.get(10)?,
                notes: row.get(11)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Stats ──

pub struct Stats {
    pub documents: usize,
    pub low_confidence: usize,
    pub npcs: usize,
    pub encounters: usize,
    pub revelations: usize,
    pub items: usize,
    pub quests: usize,
    pub locations: usize,
    pub factions: usize,
    pub references: usize,
    pub notes: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let count = |table: &str| -> Result<usize> {
        let n = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))?;
        Ok(n)
    };
    let low_confidence: usize = conn.query_row(
        "SELECT COUNT(*) FROM documents WHERE confidence < 0.5",
        [],
        |r| r.get(0),
    )?;
    Ok(Stats {
        documents: count("documents")?,
        low_confidence,
        npcs: count("npcs")?,
        encounters: count("encounters")?,
        revelations: count("revelations")?,
        items: count("items")?,
        quests: count("quests")?,
        locations: count("locations")?,
        factions: count("factions")?,
        references: count("reference_entries")?,
        notes: count("notes")?,
    })
}
