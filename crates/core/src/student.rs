//! Student read model.

use feeledger_shared::types::StudentId;
use serde::{Deserialize, Serialize};

/// The student fields other views embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    /// Student id.
    pub id: StudentId,
    /// Full name.
    pub name: String,
    /// Roll number within the school.
    pub roll_number: String,
    /// Class label, e.g. `"5A"`.
    pub class_label: String,
}
