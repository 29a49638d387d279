use rusqlite::Connection;
use sb_core::error::StoreError;
use sb_core::store::Store;
use sb_core::SkillBridgeError;

use crate::applied_skill_repo::AppliedSkillRepo;
use crate::learning_repo::LearningRepo;
use crate::util::store_error;

pub struct DbStore {
    conn: Connection,
    creator: Option<String>,
}

impl DbStore {
    /// A store that reads and writes every row regardless of creator.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            creator: None,
        }
    }

    /// A store limited to rows created by `creator`; new rows are stamped with it.
    pub fn scoped_to(conn: Connection, creator: impl Into<String>) -> Self {
        Self {
            conn,
            creator: Some(creator.into()),
        }
    }

    fn exec(&self, sql: &str) -> Result<(), StoreError> {
        self.conn.execute_batch(sql).map_err(store_error)
    }
}

impl Store for DbStore {
    type Learnings<'a>
        = LearningRepo<'a>
    where
        Self: 'a;
    type AppliedSkills<'a>
        = AppliedSkillRepo<'a>
    where
        Self: 'a;

    fn learnings(&self) -> Self::Learnings<'_> {
        LearningRepo::new(&self.conn, self.creator.as_deref())
    }

    fn applied_skills(&self) -> Self::AppliedSkills<'_> {
        AppliedSkillRepo::new(&self.conn, self.creator.as_deref())
    }

    fn with_tx<F, T>(&self, f: F) -> Result<T, SkillBridgeError>
    where
        F: FnOnce(&Self) -> Result<T, SkillBridgeError>,
    {
        self.exec("BEGIN IMMEDIATE")
            .map_err(SkillBridgeError::store("begin transaction"))?;
        match f(self) {
            Ok(value) => {
                self.exec("COMMIT")
                    .map_err(SkillBridgeError::store("commit transaction"))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.exec("ROLLBACK") {
                    tracing::error!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}
