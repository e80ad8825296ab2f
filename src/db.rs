use std::path::Path;

use anyhow::Result;
use rusqlite::{params, Connection};

use crate::parser::entry::{Dialect, Example, LexicalEntry, SemanticField};

pub fn connect(path: &str) -> Result<Connection> {
    if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS entries (
            headword           TEXT PRIMARY KEY,
            grammatical_info   TEXT NOT NULL,
            definition         TEXT NOT NULL,
            related_terms      TEXT NOT NULL,
            semantic_field     TEXT,
            dialectal_variants TEXT NOT NULL,
            cultural_notes     TEXT,
            etymology          TEXT,
            full_content       TEXT NOT NULL,
            position           INTEGER NOT NULL,
            updated_at         TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_entries_field ON entries(semantic_field);

        CREATE TABLE IF NOT EXISTS examples (
            id          INTEGER PRIMARY KEY,
            headword    TEXT NOT NULL REFERENCES entries(headword) ON DELETE CASCADE,
            source      TEXT NOT NULL,
            translation TEXT NOT NULL,
            context     TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_examples_headword ON examples(headword);

        CREATE TABLE IF NOT EXISTS runs (
            run_id        TEXT PRIMARY KEY,
            source        TEXT NOT NULL,
            pages         INTEGER NOT NULL,
            skipped_pages INTEGER NOT NULL,
            blocks        INTEGER NOT NULL,
            malformed     INTEGER NOT NULL,
            rejected      INTEGER NOT NULL,
            entries       INTEGER NOT NULL,
            started_at    TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

// ── Entries ──

/// Insert or replace entries (and their examples) by headword.
pub fn save_entries(conn: &Connection, entries: &[LexicalEntry]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let start: i64 =
            tx.query_row("SELECT COALESCE(MAX(position) + 1, 0) FROM entries", [], |r| r.get(0))?;
        let mut del_stmt = tx.prepare("DELETE FROM examples WHERE headword = ?1")?;
        let mut e_stmt = tx.prepare(
            "INSERT INTO entries
             (headword, grammatical_info, definition, related_terms, semantic_field,
              dialectal_variants, cultural_notes, etymology, full_content, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(headword) DO UPDATE SET
                grammatical_info = excluded.grammatical_info,
                definition = excluded.definition,
                related_terms = excluded.related_terms,
                semantic_field = excluded.semantic_field,
                dialectal_variants = excluded.dialectal_variants,
                cultural_notes = excluded.cultural_notes,
                etymology = excluded.etymology,
                full_content = excluded.full_content,
                updated_at = datetime('now')",
        )?;
        let mut x_stmt = tx.prepare(
            "INSERT INTO examples (headword, source, translation, context)
             VALUES (?1, ?2, ?3, ?4)",
        )?;

        for (i, e) in entries.iter().enumerate() {
            del_stmt.execute(params![e.headword])?;
            count += e_stmt.execute(params![
                e.headword,
                serde_json::to_string(&e.grammatical_info)?,
                e.definition,
                serde_json::to_string(&e.related_terms)?,
                e.semantic_field.map(|f| f.name()),
                serde_json::to_string(&e.dialectal_variants)?,
                e.cultural_notes,
                e.etymology,
                e.full_content,
                start + i as i64,
            ])?;
            for x in &e.examples {
                x_stmt.execute(params![e.headword, x.source, x.translation, x.context])?;
            }
        }
    }
    tx.commit()?;
    Ok(count)
}

/// All stored entries in the order they were first saved.
pub fn fetch_entries(conn: &Connection) -> Result<Vec<LexicalEntry>> {
    let mut stmt = conn.prepare(
        "SELECT headword, grammatical_info, definition, related_terms, semantic_field,
                dialectal_variants, cultural_notes, etymology, full_content
         FROM entries ORDER BY position",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, Option<String>>(6)?,
                row.get::<_, Option<String>>(7)?,
                row.get::<_, String>(8)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut x_stmt = conn.prepare(
        "SELECT source, translation, context FROM examples WHERE headword = ?1 ORDER BY id",
    )?;
    let mut entries = Vec::with_capacity(rows.len());
    for (headword, grammar, definition, related, field, variants, notes, etymology, full) in rows {
        let examples = x_stmt
            .query_map(params![headword], |row| {
                Ok(Example {
                    source: row.get(0)?,
                    translation: row.get(1)?,
                    context: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        entries.push(LexicalEntry {
            headword,
            grammatical_info: serde_json::from_str(&grammar)?,
            definition,
            examples,
            related_terms: serde_json::from_str(&related)?,
            semantic_field: field.as_deref().and_then(SemanticField::from_name),
            dialectal_variants: serde_json::from_str(&variants)?,
            cultural_notes: notes,
            etymology,
            full_content: full,
        });
    }
    Ok(entries)
}

// ── Runs ──

pub struct RunRow {
    pub run_id: String,
    pub source: String,
    pub pages: usize,
    pub skipped_pages: usize,
    pub blocks: usize,
    pub malformed: usize,
    pub rejected: usize,
    pub entries: usize,
    pub started_at: String,
}

pub fn new_run_id() -> String {
    chrono::Utc::now().format("%Y%m%d-%H%M%S-%3f").to_string()
}

pub fn save_run(conn: &Connection, run: &RunRow) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO runs
         (run_id, source, pages, skipped_pages, blocks, malformed, rejected, entries, started_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            run.run_id,
            run.source,
            run.pages as i64,
            run.skipped_pages as i64,
            run.blocks as i64,
            run.malformed as i64,
            run.rejected as i64,
            run.entries as i64,
            run.started_at,
        ],
    )?;
    Ok(())
}

// ── Overview ──

pub struct OverviewRow {
    pub headword: String,
    pub grammar: String,
    pub field: String,
    pub definition: String,
    pub examples: usize,
}

pub fn fetch_overview(
    conn: &Connection,
    field: Option<&str>,
    dialect: Option<Dialect>,
    limit: usize,
) -> Result<Vec<OverviewRow>> {
    let mut conditions = Vec::new();
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(f) = field {
        // accept "Bot." as well as "Botánica"
        let name = SemanticField::from_name(f).map(|sf| sf.name()).unwrap_or(f);
        conditions.push(format!("e.semantic_field = ?{}", params.len() + 1));
        params.push(Box::new(name.to_string()));
    }
    if let Some(d) = dialect {
        conditions.push(format!(
            "json_extract(e.dialectal_variants, ?{}) IS NOT NULL",
            params.len() + 1
        ));
        params.push(Box::new(format!("$.{}", d.tag())));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT e.headword, e.grammatical_info, COALESCE(e.semantic_field,''), e.definition,
                (SELECT COUNT(*) FROM examples x WHERE x.headword = e.headword)
         FROM entries e{}
         ORDER BY e.position
         LIMIT {}",
        where_clause, limit
    );

    let mut stmt = conn.prepare(&sql)?;
    let param_refs: Vec<&dyn rusqlite::types::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let rows = stmt
        .query_map(param_refs.as_slice(), |row| {
            let grammar: String = row.get(1)?;
            Ok(OverviewRow {
                headword: row.get(0)?,
                grammar: serde_json::from_str::<Vec<String>>(&grammar)
                    .map(|g| g.join(" "))
                    .unwrap_or_default(),
                field: row.get(2)?,
                definition: row.get(3)?,
                examples: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Stats ──

pub struct Stats {
    pub entries: usize,
    pub examples: usize,
    pub with_field: usize,
    pub with_dialects: usize,
    pub with_notes: usize,
    pub runs: usize,
    pub last_run: Option<RunRow>,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let entries: usize = conn.query_row("SELECT COUNT(*) FROM entries", [], |r| r.get(0))?;
    let examples: usize = conn.query_row("SELECT COUNT(*) FROM examples", [], |r| r.get(0))?;
    let with_field: usize = conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE semantic_field IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let with_dialects: usize = conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE dialectal_variants != '{}'",
        [],
        |r| r.get(0),
    )?;
    let with_notes: usize = conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE cultural_notes IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    let runs: usize = conn.query_row("SELECT COUNT(*) FROM runs", [], |r| r.get(0))?;

    let mut stmt = conn.prepare(
        "SELECT run_id, source, pages, skipped_pages, blocks, malformed, rejected, entries, started_at
         FROM runs ORDER BY started_at DESC, run_id DESC LIMIT 1",
    )?;
    let last_run = stmt
        .query_map([], |row| {
            Ok(RunRow {
                run_id: row.get(0)?,
                source: row.get(1)?,
                pages: row.get(2)?,
                skipped_pages: row.get(3)?,
                blocks: row.get(4)?,
                malformed: row.get(5)?,
                rejected: row.get(6)?,
                entries: row.get(7)?,
                started_at: row.get(8)?,
            })
        })?
        .next()
        .transpose()?;

    Ok(Stats {
        entries,
        examples,
        with_field,
        with_dialects,
        with_notes,
        runs,
        last_run,
    })
}
