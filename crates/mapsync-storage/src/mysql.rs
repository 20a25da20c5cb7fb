use async_trait::async_trait;
use jiff::Timestamp;
use mapsync_core::repository::{ReadRepository, Repository, Result};
use mapsync_core::{Stop, StorageError, TripCode, TripRecord};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::trace;

const SELECT_COLUMNS: &str = r#"
    SELECT code, origin, destination,
           CAST(stops AS CHAR) AS stops,
           CAST(participants AS CHAR) AS participants,
           created_by, created_at
    FROM trips
"#;

/// MySQL implementation of the trip store.
///
/// The code is the primary key, so the unique violation on insert is the
/// atomic create-if-absent. Stops and participants are JSON columns;
/// `created_at` holds microseconds since the Unix epoch.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn parse_created_at(micros: i64) -> Result<Timestamp> {
    Timestamp::from_microsecond(micros).map_err(|e| {
        StorageError::InvalidData(format!("invalid created_at timestamp '{}': {e}", micros))
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(column: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw)
        .map_err(|e| StorageError::InvalidData(format!("invalid {column} column: {e}")))
}

fn to_json<T: serde::Serialize>(column: &str, value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| StorageError::InvalidData(format!("cannot encode {column}: {e}")))
}

fn decode_row(row: &MySqlRow) -> Result<TripRecord> {
    let code: String = row.try_get("code").map_err(map_sqlx_error)?;
    let id = TripCode::new(code).map_err(|e| StorageError::InvalidData(e.to_string()))?;
    let stops_raw: String = row.try_get("stops").map_err(map_sqlx_error)?;
    let participants_raw: String = row.try_get("participants").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(TripRecord {
        id,
        origin: row.try_get("origin").map_err(map_sqlx_error)?,
        destination: row.try_get("destination").map_err(map_sqlx_error)?,
        stops: parse_json::<Vec<Stop>>("stops", &stops_raw)?,
        created_at: parse_created_at(created_at)?,
        created_by: row.try_get("created_by").map_err(map_sqlx_error)?,
        participants: parse_json::<Vec<String>>("participants", &participants_raw)?,
    })
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn get(&self, code: &TripCode) -> Result<Option<TripRecord>> {
        let query = format!("{SELECT_COLUMNS} WHERE code = ? LIMIT 1");

        let row = sqlx::query(&query)
            .bind(code.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(decode_row).transpose()
    }

    async fn exists(&self, code: &TripCode) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM trips
            WHERE code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }

    async fn list_by_user(&self, user: &str) -> Result<Vec<TripRecord>> {
        let query = format!(
            "{SELECT_COLUMNS} WHERE created_by = ? OR JSON_CONTAINS(participants, JSON_QUOTE(?)) \
             ORDER BY created_at DESC, code ASC"
        );

        let rows = sqlx::query(&query)
            .bind(user)
            .bind(user)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        trace!(user = %user, count = rows.len(), "listed trips for user");
        rows.iter().map(decode_row).collect()
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, code: &TripCode, record: TripRecord) -> Result<()> {
        let stops = to_json("stops", &record.stops)?;
        let participants = to_json("participants", &record.participants)?;

        let result = sqlx::query(
            r#"
            INSERT INTO trips (code, origin, destination, stops, participants, created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(code.as_str())
        .bind(record.origin)
        .bind(record.destination)
        .bind(stops)
        .bind(participants)
        .bind(record.created_by)
        .bind(record.created_at.as_microsecond())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(code.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn add_participant(&self, code: &TripCode, user: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE trips
            SET participants = JSON_ARRAY_APPEND(participants, '$', ?)
            WHERE code = ?
              AND NOT JSON_CONTAINS(participants, JSON_QUOTE(?))
            "#,
        )
        .bind(user)
        .bind(code.as_str())
        .bind(user)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Nothing changed: either the user already joined or the trip is missing.
        self.exists(code).await
    }
}
