use crate::util::{from_rfc3339, store_error, to_rfc3339};
use rusqlite::{Connection, OptionalExtension};
use sb_core::error::StoreError;
use sb_core::learnings::LearningRepository;
use sb_core::types::{Learning, LearningId, NewLearning};

const SELECT_COLUMNS: &str = "SELECT id, topic, category, source, created_time FROM Learning";

/// Rows are filtered by `creator_id` when `creator` is set; `None` sees every row.
pub struct LearningRepo<'a> {
    pub conn: &'a Connection,
    pub creator: Option<&'a str>,
}

impl<'a> LearningRepo<'a> {
    pub fn new(conn: &'a Connection, creator: Option<&'a str>) -> Self {
        Self { conn, creator }
    }
}

impl LearningRepository for LearningRepo<'_> {
    fn list(&self) -> Result<Vec<Learning>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "{SELECT_COLUMNS} WHERE (?1 IS NULL OR creator_id = ?1) ORDER BY id ASC"
            ))
            .map_err(store_error)?;
        let rows = stmt.query_map([self.creator], read_row).map_err(store_error)?;
        let mut learnings = Vec::new();
        for row in rows {
            learnings.push(into_learning(row.map_err(store_error)?)?);
        }
        Ok(learnings)
    }

    fn get(&self, id: LearningId) -> Result<Option<Learning>, StoreError> {
        let row = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1 AND (?2 IS NULL OR creator_id = ?2)"),
                (id.get(), self.creator),
                read_row,
            )
            .optional()
            .map_err(store_error)?;
        row.map(into_learning).transpose()
    }

    fn create(&self, input: NewLearning) -> Result<Learning, StoreError> {
        let created_time = chrono::Utc::now();
        self.conn
            .execute(
                "INSERT INTO Learning (topic, category, source, created_time, creator_id) VALUES (?1, ?2, ?3, ?4, ?5)",
                (
                    &input.topic,
                    &input.category,
                    input.source.as_deref(),
                    to_rfc3339(&created_time),
                    self.creator,
                ),
            )
            .map_err(store_error)?;
        Ok(Learning {
            id: LearningId::new(self.conn.last_insert_rowid()),
            topic: input.topic,
            category: input.category,
            source: input.source,
            created_time,
        })
    }

    fn delete(&self, id: LearningId) -> Result<(), StoreError> {
        self.conn
            .execute(
                "DELETE FROM Learning WHERE id = ?1 AND (?2 IS NULL OR creator_id = ?2)",
                (id.get(), self.creator),
            )
            .map_err(store_error)?;
        Ok(())
    }
}

type LearningRow = (i64, String, String, Option<String>, String);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LearningRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn into_learning(row: LearningRow) -> Result<Learning, StoreError> {
    let (id, topic, category, source, created_time) = row;
    Ok(Learning {
        id: LearningId::new(id),
        topic,
        category,
        source,
        created_time: from_rfc3339(&created_time)?,
    })
}
