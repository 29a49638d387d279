use serde::{Deserialize, Serialize};

/// Optional parts of the API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Accept and render the `applied_action` field on applied skills.
    pub applied_action: bool,
    /// Expose `PUT` and `DELETE` on `/api/applied/{id}`.
    pub applied_mutations: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            applied_action: true,
            applied_mutations: true,
        }
    }
}
