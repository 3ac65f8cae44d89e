//! Read-only snapshot transactions for multi-query reads.

use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, DbErr, IsolationLevel, TransactionTrait,
};

/// Opens a `REPEATABLE READ` read-only transaction, so every query sees the
/// same committed state.
pub(crate) async fn begin_snapshot(
    db: &DatabaseConnection,
) -> Result<DatabaseTransaction, DbErr> {
    db.begin_with_config(
        Some(IsolationLevel::RepeatableRead),
        Some(AccessMode::ReadOnly),
    )
    .await
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{
        ActiveModelTrait, ActiveValue::Set, ColumnTrait, Database, EntityTrait, PaginatorTrait,
        QueryFilter,
    };
    use uuid::Uuid;

    use super::*;
    use crate::entities::students;
    use crate::migration::{Migrator, MigratorTrait};

    async fn try_connect() -> Option<DatabaseConnection> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let db = Database::connect(&url).await.ok()?;
        Migrator::up(&db, None).await.ok()?;
        Some(db)
    }

    fn student(class_label: &str) -> students::ActiveModel {
        students::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set("Nila Bose".to_string()),
            roll_number: Set(Uuid::new_v4().simple().to_string()[..20].to_string()),
            class_label: Set(class_label.to_string()),
            created_at: Set(Utc::now().into()),
        }
    }

    #[tokio::test]
    async fn test_snapshot_ignores_later_commits_and_rejects_writes() {
        let Some(db) = try_connect().await else {
            eprintln!("Skipping test - database not available");
            return;
        };
        let class_label = format!("SNAP-{}", &Uuid::new_v4().simple().to_string()[..12]);
        let in_class = || {
            students::Entity::find().filter(students::Column::ClassLabel.eq(class_label.as_str()))
        };

        let snapshot = begin_snapshot(&db).await.unwrap();
        assert_eq!(in_class().count(&snapshot).await.unwrap(), 0);

        student(&class_label).insert(&db).await.unwrap();
        assert_eq!(in_class().count(&db).await.unwrap(), 1);
        assert_eq!(in_class().count(&snapshot).await.unwrap(), 0);

        assert!(student(&class_label).insert(&snapshot).await.is_err());
        snapshot.rollback().await.unwrap();
    }
}
