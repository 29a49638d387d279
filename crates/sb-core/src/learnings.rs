use crate::error::StoreError;
use crate::types::{Learning, LearningId, NewLearning};
use std::collections::HashMap;

pub trait LearningRepository {
    fn list(&self) -> Result<Vec<Learning>, StoreError>;
    fn get(&self, id: LearningId) -> Result<Option<Learning>, StoreError>;
    fn create(&self, input: NewLearning) -> Result<Learning, StoreError>;
    fn delete(&self, id: LearningId) -> Result<(), StoreError>;
}

/// Groups raw `learning_id` values into per-learning counts in a single pass.
pub fn applied_counts<I>(learning_ids: I) -> HashMap<LearningId, u64>
where
    I: IntoIterator<Item = LearningId>,
{
    let mut counts = HashMap::new();
    for id in learning_ids {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}
