//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation. Every tenant-scoped table
//! carries the owning `organization_id` directly.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Organizations (the unit of data isolation)
-- =======================================================================
DEFINE TABLE organization SCHEMAFULL;
DEFINE FIELD name ON TABLE organization TYPE string;
DEFINE FIELD slug ON TABLE organization TYPE string;
DEFINE FIELD category ON TABLE organization TYPE option<string>;
DEFINE FIELD created_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_organization_slug ON TABLE organization \
    COLUMNS slug UNIQUE;

-- =======================================================================
-- Primary membership: one row per user
-- =======================================================================
DEFINE TABLE admin_user SCHEMAFULL;
DEFINE FIELD user_id ON TABLE admin_user TYPE string;
DEFINE FIELD role ON TABLE admin_user TYPE string \
    ASSERT $value IN ['SuperAdmin', 'OrgAdmin'];
DEFINE FIELD organization_id ON TABLE admin_user TYPE option<string>;
DEFINE FIELD created_at ON TABLE admin_user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_admin_user_user ON TABLE admin_user \
    COLUMNS user_id UNIQUE;

-- =======================================================================
-- Secondary membership: many members per organization
-- =======================================================================
DEFINE TABLE organization_member SCHEMAFULL;
DEFINE FIELD organization_id ON TABLE organization_member TYPE string;
DEFINE FIELD user_id ON TABLE organization_member TYPE string;
DEFINE FIELD role ON TABLE organization_member TYPE string \
    ASSERT $value IN ['Admin', 'Staff'];
DEFINE FIELD created_at ON TABLE organization_member TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_org_member ON TABLE organization_member \
    COLUMNS organization_id, user_id UNIQUE;

-- =======================================================================
-- Job postings
-- =======================================================================
DEFINE TABLE job SCHEMAFULL;
DEFINE FIELD organization_id ON TABLE job TYPE string;
DEFINE FIELD title ON TABLE job TYPE string;
DEFINE FIELD description ON TABLE job TYPE string;
DEFINE FIELD location ON TABLE job TYPE option<string>;
DEFINE FIELD employment_type ON TABLE job TYPE option<string>;
DEFINE FIELD status ON TABLE job TYPE string \
    ASSERT $value IN ['Draft', 'Published', 'Closed'];
DEFINE FIELD created_at ON TABLE job TYPE datetime DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE job TYPE datetime DEFAULT time::now();
DEFINE INDEX idx_job_org ON TABLE job COLUMNS organization_id;

-- =======================================================================
-- Applications (organization_id denormalized from the job)
-- =======================================================================
DEFINE TABLE application SCHEMAFULL;
DEFINE FIELD job_id ON TABLE application TYPE string;
DEFINE FIELD organization_id ON TABLE application TYPE string;
DEFINE FIELD applicant_user_id ON TABLE application TYPE string;
DEFINE FIELD applicant_name ON TABLE application TYPE string;
DEFINE FIELD applicant_email ON TABLE application TYPE string;
DEFINE FIELD applicant_message ON TABLE application TYPE string;
DEFINE FIELD status ON TABLE application TYPE string \
    ASSERT $value IN ['New', 'InProgress', 'Done', 'Rejected', 'Archived'];
DEFINE FIELD include_documents ON TABLE application TYPE bool;
DEFINE FIELD resume_path ON TABLE application TYPE option<string>;
DEFINE FIELD cv_path ON TABLE application TYPE option<string>;
DEFINE FIELD created_at ON TABLE application TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE application TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_application_org ON TABLE application \
    COLUMNS organization_id;
DEFINE INDEX idx_application_applicant ON TABLE application \
    COLUMNS applicant_user_id;

-- =======================================================================
-- Conversations (one per application, created lazily)
-- =======================================================================
DEFINE TABLE conversation SCHEMAFULL;
DEFINE FIELD application_id ON TABLE conversation TYPE string;
DEFINE FIELD organization_id ON TABLE conversation TYPE string;
DEFINE FIELD applicant_user_id ON TABLE conversation TYPE string;
DEFINE FIELD created_at ON TABLE conversation TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_conversation_application ON TABLE conversation \
    COLUMNS application_id UNIQUE;

-- =======================================================================
-- Messages
-- =======================================================================
DEFINE TABLE message SCHEMAFULL;
DEFINE FIELD conversation_id ON TABLE message TYPE string;
DEFINE FIELD sender ON TABLE message TYPE string \
    ASSERT $value IN ['Applicant', 'Company'];
DEFINE FIELD sender_user_id ON TABLE message TYPE string;
DEFINE FIELD body ON TABLE message TYPE string;
DEFINE FIELD created_at ON TABLE message TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_message_conversation ON TABLE message \
    COLUMNS conversation_id;
";

/// Run all pending migrations against the given database.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(format!("migration table DDL failed: {e}")))?;

    let mut result = db
        .query("SELECT version, name FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let applied: Vec<MigrationRecord> = result
        .take(0)
        .map_err(|e| DbError::Migration(format!("reading migration state failed: {e}")))?;
    let current = applied.first().map(|r| r.version).unwrap_or(0);

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );

        db.query(migration.sql)
            .await?
            .check()
            .map_err(|e| DbError::Migration(format!("migration {} failed: {e}", migration.name)))?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name.to_string()))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "recording migration {} failed: {e}",
                    migration.name
                ))
            })?;
    }

    Ok(())
}
