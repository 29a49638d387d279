use crate::util::{from_rfc3339, store_error, to_rfc3339};
use rusqlite::{Connection, OptionalExtension};
use sb_core::applied_skills::AppliedSkillRepository;
use sb_core::error::StoreError;
use sb_core::types::{
    AppliedSkill, AppliedSkillId, AppliedSkillUpdate, LearningId, NewAppliedSkill,
};

const SELECT_COLUMNS: &str =
    "SELECT id, learning_id, type, notes, applied_action, created_time FROM AppliedSkill";

pub struct AppliedSkillRepo<'a> {
    pub conn: &'a Connection,
    pub creator: Option<&'a str>,
}

impl<'a> AppliedSkillRepo<'a> {
    pub fn new(conn: &'a Connection, creator: Option<&'a str>) -> Self {
        Self { conn, creator }
    }
}

impl AppliedSkillRepository for AppliedSkillRepo<'_> {
    fn learning_ids(&self) -> Result<Vec<LearningId>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT learning_id FROM AppliedSkill WHERE (?1 IS NULL OR creator_id = ?1)")
            .map_err(store_error)?;
        let rows = stmt
            .query_map([self.creator], |row| row.get::<_, i64>(0))
            .map_err(store_error)?;
        let mut ids = Vec::new();
        for row in rows {
            ids.push(LearningId::new(row.map_err(store_error)?));
        }
        Ok(ids)
    }

    fn list_for_learning(&self, learning_id: LearningId) -> Result<Vec<AppliedSkill>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "{SELECT_COLUMNS} WHERE learning_id = ?1 AND (?2 IS NULL OR creator_id = ?2) ORDER BY id ASC"
            ))
            .map_err(store_error)?;
        let rows = stmt
            .query_map((learning_id.get(), self.creator), read_row)
            .map_err(store_error)?;
        let mut skills = Vec::new();
        for row in rows {
            skills.push(into_applied_skill(row.map_err(store_error)?)?);
        }
        Ok(skills)
    }

    fn get(&self, id: AppliedSkillId) -> Result<Option<AppliedSkill>, StoreError> {
        let row = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1 AND (?2 IS NULL OR creator_id = ?2)"),
                (id.get(), self.creator),
                read_row,
            )
            .optional()
            .map_err(store_error)?;
        row.map(into_applied_skill).transpose()
    }

    fn create(&self, input: NewAppliedSkill) -> Result<AppliedSkill, StoreError> {
        let created_time = chrono::Utc::now();
        self.conn
            .execute(
                "INSERT INTO AppliedSkill (learning_id, type, notes, applied_action, created_time, creator_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                (
                    input.learning_id.get(),
                    &input.skill_type,
                    input.notes.as_deref(),
                    input.applied_action.as_deref(),
                    to_rfc3339(&created_time),
                    self.creator,
                ),
            )
            .map_err(store_error)?;
        Ok(AppliedSkill {
            id: AppliedSkillId::new(self.conn.last_insert_rowid()),
            learning_id: input.learning_id,
            skill_type: input.skill_type,
            notes: input.notes,
            applied_action: input.applied_action,
            created_time,
        })
    }

    fn update(&self, id: AppliedSkillId, input: AppliedSkillUpdate) -> Result<(), StoreError> {
        self.conn
            .execute(
                "UPDATE AppliedSkill SET type = ?1, notes = ?2 WHERE id = ?3 AND (?4 IS NULL OR creator_id = ?4)",
                (&input.skill_type, &input.notes, id.get(), self.creator),
            )
            .map_err(store_error)?;
        Ok(())
    }

    fn delete(&self, id: AppliedSkillId) -> Result<(), StoreError> {
        self.conn
            .execute(
                "DELETE FROM AppliedSkill WHERE id = ?1 AND (?2 IS NULL OR creator_id = ?2)",
                (id.get(), self.creator),
            )
            .map_err(store_error)?;
        Ok(())
    }

    fn delete_for_learning(&self, learning_id: LearningId) -> Result<(), StoreError> {
        let removed = self
            .conn
            .execute(
                "DELETE FROM AppliedSkill WHERE learning_id = ?1 AND (?2 IS NULL OR creator_id = ?2)",
                (learning_id.get(), self.creator),
            )
            .map_err(store_error)?;
        tracing::debug!(learning_id = %learning_id, removed, "removed applied skills");
        Ok(())
    }
}

type AppliedSkillRow = (i64, i64, String, Option<String>, Option<String>, String);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AppliedSkillRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn into_applied_skill(row: AppliedSkillRow) -> Result<AppliedSkill, StoreError> {
    let (id, learning_id, skill_type, notes, applied_action, created_time) = row;
    Ok(AppliedSkill {
        id: AppliedSkillId::new(id),
        learning_id: LearningId::new(learning_id),
        skill_type,
        notes,
        applied_action,
        created_time: from_rfc3339(&created_time)?,
    })
}
