//! # Generation Storage
//!
//! Persists finished generation runs to SQLite via Turso. Persistence is the
//! caller's concern, not the core's: the generation result is already final
//! by the time anything here runs, so storage failures degrade to an
//! unstored-but-returned result rather than failing the request.
//!
//! Unique-constraint collisions are handled by an explicit bounded
//! [`RetryPolicy`] with an injected [`CollisionStrategy`] that mutates the
//! conflicting key between attempts.

use chrono::Utc;
use tracing::warn;
use turso::{params, Database};
use uuid::Uuid;

pub const GENERATIONS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS generations (
    id TEXT PRIMARY KEY,
    prompt TEXT NOT NULL UNIQUE,
    format TEXT NOT NULL,
    size_tier TEXT NOT NULL,
    generated_data TEXT NOT NULL,
    chunk_count INTEGER NOT NULL,
    record_count INTEGER NOT NULL,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL
)";

/// Every table the server needs, executed on startup and in test setup.
pub const ALL_TABLE_CREATION_SQL: &[&str] = &[GENERATIONS_TABLE_SQL];

/// A generation result ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewGeneration {
    pub prompt: String,
    pub format: String,
    pub size_tier: String,
    pub generated_data: String,
    pub chunk_count: i64,
    pub record_count: i64,
}

/// Bounds how many insert attempts a single store operation may make.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// Decides how to mutate a record whose key collided with an existing row.
pub trait CollisionStrategy: Send + Sync {
    fn resolve(&self, record: &mut NewGeneration);
}

/// Appends a short random suffix to the prompt key, matching the convention
/// of suffixing rather than overwriting on collision.
pub struct UniqueSuffixStrategy;

impl CollisionStrategy for UniqueSuffixStrategy {
    fn resolve(&self, record: &mut NewGeneration) {
        let suffix = Uuid::new_v4().simple().to_string();
        record.prompt = format!("{}_{}", record.prompt, &suffix[..6]);
    }
}

/// Ensures that all required tables exist. Idempotent and safe to call on
/// every application startup.
pub async fn initialize_schema(db: &Database) -> anyhow::Result<()> {
    let conn = db.connect()?;
    for statement in ALL_TABLE_CREATION_SQL {
        conn.execute(*statement, ()).await?;
    }
    Ok(())
}

/// Inserts a generation record, retrying with a mutated key on
/// unique-constraint collisions.
///
/// Returns the id of the inserted row. Any non-collision error, or a
/// collision on the final attempt, is propagated to the caller.
pub async fn insert_generation(
    db: &Database,
    mut record: NewGeneration,
    policy: &RetryPolicy,
    on_collision: &dyn CollisionStrategy,
) -> anyhow::Result<String> {
    let conn = db.connect()?;

    let mut attempt = 0;
    loop {
        attempt += 1;
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();

        let result = conn
            .execute(
                "INSERT INTO generations (id, prompt, format, size_tier, generated_data, chunk_count, record_count, status, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    id.clone(),
                    record.prompt.clone(),
                    record.format.clone(),
                    record.size_tier.clone(),
                    record.generated_data.clone(),
                    record.chunk_count,
                    record.record_count,
                    "success",
                    created_at
                ],
            )
            .await;

        match result {
            Ok(_) => return Ok(id),
            Err(e) if is_unique_violation(&e) && attempt < policy.max_attempts => {
                warn!(
                    attempt,
                    "Unique constraint hit while storing generation, mutating key and retrying"
                );
                on_collision.resolve(&mut record);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn is_unique_violation(e: &turso::Error) -> bool {
    e.to_string().to_uppercase().contains("UNIQUE")
}
