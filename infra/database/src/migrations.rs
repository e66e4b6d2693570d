use crate::error::{DatabaseError, DatabaseErrorExt};
use fxhash::FxHashMap;
use sha2::{Digest, Sha256};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use surrealdb::types::SurrealValue;

/// Schema scripts shipped with the binary, applied in order.
const MIGRATIONS: &[(&str, &str)] = &[
    ("0001_migration_ledger", include_str!("../migrations/0001_migration_ledger.surql")),
    ("0002_registration", include_str!("../migrations/0002_registration.surql")),
];

#[derive(Debug)]
pub(crate) struct Migration {
    pub version: &'static str,
    pub script: &'static str,
    pub checksum: String,
}

impl Migration {
    fn new(version: &'static str, script: &'static str) -> Self {
        Self { version, script, checksum: hex::encode(Sha256::digest(script.as_bytes())) }
    }

    fn to_applied(&self) -> AppliedMigration {
        AppliedMigration { version: self.version.to_owned(), checksum: self.checksum.clone() }
    }
}

pub(crate) fn builtin_migrations() -> Vec<Migration> {
    MIGRATIONS.iter().map(|(version, script)| Migration::new(version, script)).collect()
}

#[derive(Debug, Default)]
pub(crate) struct MigrationReport {
    pub applied: Vec<AppliedMigration>,
    pub skipped: Vec<AppliedMigration>,
}

#[derive(Debug, SurrealValue)]
pub(crate) struct AppliedMigration {
    pub version: String,
    pub checksum: String,
}

#[derive(Debug)]
pub(crate) struct MigrationRunner {
    db: Surreal<Any>,
}

impl MigrationRunner {
    #[must_use]
    pub(crate) const fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    pub(crate) async fn run(&self) -> Result<MigrationReport, DatabaseError> {
        self.run_migrations(builtin_migrations()).await
    }

    pub(crate) async fn run_migrations(
        &self,
        migrations: Vec<Migration>,
    ) -> Result<MigrationReport, DatabaseError> {
        let mut report = MigrationReport::default();
        let applied = self.applied_migrations().await?;

        for migration in migrations {
            if let Some(existing) = applied.get(migration.version) {
                ensure_checksum_match(&migration, &existing.checksum)?;
                report.skipped.push(migration.to_applied());
                continue;
            }

            self.apply(&migration).await?;
            report.applied.push(migration.to_applied());
        }

        Ok(report)
    }

    async fn apply(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let query = format!(
            "BEGIN TRANSACTION;
            {}
            CREATE migration SET version = $version, checksum = $checksum;
            COMMIT TRANSACTION;",
            migration.script,
        );

        self.db
            .query(query)
            .bind(("version", migration.version))
            .bind(("checksum", migration.checksum.clone()))
            .await
            .context(format!("Executing migration {}", migration.version))?
            .check()
            .map_err(|e| DatabaseError::Migration {
                message: e.to_string().into(),
                context: Some(format!("Migration {} was rejected", migration.version).into()),
            })?;

        Ok(())
    }

    async fn ledger_exists(&self) -> Result<bool, DatabaseError> {
        let tables = self
            .db
            .query("RETURN object::keys((INFO FOR DB).tables)")
            .await
            .context("Listing tables")?
            .take::<Option<Vec<String>>>(0)
            .context("Parsing table list")?
            .unwrap_or_default();

        Ok(tables.iter().any(|table| table == "migration"))
    }

    async fn applied_migrations(
        &self,
    ) -> Result<FxHashMap<String, AppliedMigration>, DatabaseError> {
        if !self.ledger_exists().await? {
            return Ok(FxHashMap::default());
        }

        let entries = self
            .db
            .query("SELECT version, checksum FROM migration")
            .await
            .context("Loading applied migrations")?
            .take::<Vec<AppliedMigration>>(0)
            .context("Parsing applied migrations")?;

        Ok(entries.into_iter().map(|entry| (entry.version.clone(), entry)).collect())
    }
}

fn ensure_checksum_match(migration: &Migration, recorded: &str) -> Result<(), DatabaseError> {
    if recorded == migration.checksum {
        return Ok(());
    }

    Err(DatabaseError::Migration {
        message: format!(
            "Checksum mismatch for {} (recorded {recorded}, embedded {})",
            migration.version, migration.checksum
        )
        .into(),
        context: Some("Migration already applied with different contents".into()),
    })
}
