//! Student repository.
//!
//! Students are owned by the school registry; this side only reads them.

use feeledger_core::student::StudentSummary;
use feeledger_shared::types::StudentId;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::students;

impl From<students::Model> for StudentSummary {
    fn from(model: students::Model) -> Self {
        Self {
            id: StudentId::from_uuid(model.id),
            name: model.name,
            roll_number: model.roll_number,
            class_label: model.class_label,
        }
    }
}

/// Student repository.
#[derive(Debug, Clone)]
pub struct StudentRepository {
    db: DatabaseConnection,
}

impl StudentRepository {
    /// Creates a new student repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists students, optionally of one class, by class then roll number.
    pub async fn list_students(
        &self,
        class_label: Option<&str>,
    ) -> Result<Vec<StudentSummary>, DbErr> {
        let mut query = students::Entity::find();
        if let Some(class_label) = class_label {
            query = query.filter(students::Column::ClassLabel.eq(class_label));
        }
        Ok(query
            .order_by_asc(students::Column::ClassLabel)
            .order_by_asc(students::Column::RollNumber)
            .all(&self.db)
            .await?
            .into_iter()
            .map(StudentSummary::from)
            .collect())
    }
}
