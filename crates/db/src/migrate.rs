//! Applies module-contributed SQL migrations exactly once.

use crate::{Database, DbError, DbResult};

const LEDGER_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS _migrations (
        module     TEXT NOT NULL,
        id         TEXT NOT NULL,
        applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        PRIMARY KEY (module, id)
    );
"#;

/// Migration definition for modules
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

/// Run pending migrations in the given order, returning how many were applied.
///
/// Each migration runs in its own transaction together with its ledger row, so
/// a failed script leaves no trace and is retried on the next run.
pub async fn run_migrations(db: &Database, migrations: &[(String, Migration)]) -> DbResult<usize> {
    sqlx::raw_sql(LEDGER_DDL).execute(db.pool()).await?;

    let mut applied = 0;
    for (module, migration) in migrations {
        let already: Option<(String,)> =
            sqlx::query_as("SELECT id FROM _migrations WHERE module = ? AND id = ?")
                .bind(module)
                .bind(migration.id)
                .fetch_optional(db.pool())
                .await?;

        if already.is_some() {
            tracing::debug!(module = %module, id = migration.id, "migration already applied");
            continue;
        }

        let wrap = |source: sqlx::Error| DbError::Migration {
            module: module.clone(),
            id: migration.id.to_string(),
            source,
        };

        let mut tx = db.pool().begin().await?;
        sqlx::raw_sql(migration.up)
            .execute(&mut *tx)
            .await
            .map_err(wrap)?;
        sqlx::query("INSERT INTO _migrations (module, id) VALUES (?, ?)")
            .bind(module)
            .bind(migration.id)
            .execute(&mut *tx)
            .await
            .map_err(wrap)?;
        tx.commit().await?;

        tracing::info!(module = %module, id = migration.id, "migration applied");
        applied += 1;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widgets() -> Vec<(String, Migration)> {
        vec![(
            "widgets".to_string(),
            Migration {
                id: "001_init",
                up: "CREATE TABLE widget (id INTEGER PRIMARY KEY, name TEXT NOT NULL);",
            },
        )]
    }

    #[tokio::test]
    async fn applies_pending_migrations_once() {
        let db = Database::in_memory().await.unwrap();

        assert_eq!(run_migrations(&db, &widgets()).await.unwrap(), 1);
        assert_eq!(run_migrations(&db, &widgets()).await.unwrap(), 0);

        sqlx::query("INSERT INTO widget (name) VALUES ('gear')")
            .execute(db.pool())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn failed_migration_is_not_recorded() {
        let db = Database::in_memory().await.unwrap();
        let broken = vec![(
            "widgets".to_string(),
            Migration {
                id: "002_broken",
                up: "CREATE TABLE oops (;",
            },
        )];

        let err = run_migrations(&db, &broken).await.unwrap_err();
        assert!(matches!(err, DbError::Migration { ref id, .. } if id == "002_broken"));

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _migrations")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
