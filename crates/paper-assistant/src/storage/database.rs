//! SQLite database holding uploaded papers
//!
//! Single table `data(title, content, embedding, fileStorage)`. Embeddings are
//! little-endian `f32` BLOBs; ranking computes cosine distance over every row.

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::{PaperContent, PaperRecord, RetrievedDocument};

/// SQLite-based paper database
#[derive(Clone)]
pub struct PaperDb {
    conn: Arc<Mutex<Connection>>,
}

impl PaperDb {
    /// Create or open the database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| Error::database(format!("Failed to open database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate(true)?;
        Ok(db)
    }

    /// Create an in-memory database
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::database(format!("Failed to open in-memory database: {}", e)))?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.migrate(false)?;
        Ok(db)
    }

    /// Run database migrations
    fn migrate(&self, on_disk: bool) -> Result<()> {
        let conn = self.conn.lock();

        if on_disk {
            conn.execute_batch(
                r#"
                PRAGMA journal_mode=WAL;
                PRAGMA synchronous=NORMAL;
            "#,
            )
            .map_err(|e| Error::database(format!("Failed to set pragmas: {}", e)))?;
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS data (
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                embedding BLOB NOT NULL,
                fileStorage BLOB NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_data_title ON data(title);
        "#,
        )
        .map_err(|e| Error::database(format!("Failed to create schema: {}", e)))?;

        Ok(())
    }

    /// Insert a paper
    pub fn insert_paper(&self, paper: &PaperRecord) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO data (title, content, embedding, fileStorage) VALUES (?1, ?2, ?3, ?4)",
            params![
                paper.title,
                paper.content,
                encode_embedding(&paper.embedding),
                paper.file
            ],
        )?;
        Ok(())
    }

    /// Content and title for an exact title match (first upload wins)
    pub fn get_content(&self, title: &str) -> Result<Option<PaperContent>> {
        let conn = self.conn.lock();
        let content = conn
            .query_row(
                "SELECT content, title FROM data WHERE title = ?1 ORDER BY rowid LIMIT 1",
                params![title],
                |row| {
                    Ok(PaperContent {
                        content: row.get(0)?,
                        title: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(content)
    }

    /// Stored file bytes for an exact title match
    pub fn get_file(&self, title: &str) -> Result<Option<Vec<u8>>> {
        let conn = self.conn.lock();
        let file = conn
            .query_row(
                "SELECT fileStorage FROM data WHERE title = ?1 ORDER BY rowid LIMIT 1",
                params![title],
                |row| row.get(0),
            )
            .optional()?;
        Ok(file)
    }

    /// Rank every paper by cosine distance to the query and keep the closest `top_k`
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<RetrievedDocument>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT title, content, embedding FROM data ORDER BY rowid")?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Vec<u8>>(2)?,
            ))
        })?;

        let mut ranked = Vec::new();
        for row in rows {
            let (title, content, blob) = row?;
            let embedding = match decode_embedding(&blob) {
                Some(e) if e.len() == query_embedding.len() => e,
                _ => {
                    tracing::warn!("Skipping '{}': embedding dimension mismatch", title);
                    continue;
                }
            };

            ranked.push(RetrievedDocument {
                distance: cosine_distance(query_embedding, &embedding),
                content,
                title,
            });
        }

        // Stable sort keeps upload order between equal distances
        ranked.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
        ranked.truncate(top_k);

        Ok(ranked)
    }

    /// Distinct titles in upload order
    pub fn list_titles(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT title FROM data GROUP BY title ORDER BY MIN(rowid)")?;
        let titles = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(titles)
    }

    /// Number of stored papers
    pub fn count(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM data", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Run a trivial query to confirm the connection works
    pub fn ping(&self) -> Result<()> {
        let conn = self.conn.lock();
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}

/// Cosine distance in `[0, 2]`; zero vectors are treated as orthogonal
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }

    1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())
}

fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn decode_embedding(bytes: &[u8]) -> Option<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    )
}
