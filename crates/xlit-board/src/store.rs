//! Single read against the externally owned message table.

use std::time::Duration;

use sqlx::postgres::PgConnection;
use sqlx::{Connection, Row};

use xlit_core::Message;

const LATEST_MESSAGE_SQL: &str =
    "SELECT content, created_on FROM messages ORDER BY created_on DESC LIMIT 1";

/// Errors on the board's database path. Surfaced to the page as a 500; the
/// table itself is never written.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("database error: {0}")]
    Database(String),

    #[error("database timed out after {0:?}")]
    Timeout(Duration),
}

impl From<sqlx::Error> for BoardError {
    fn from(e: sqlx::Error) -> Self {
        BoardError::Database(e.to_string())
    }
}

/// Force TLS on the connection string: append `sslmode=require` unless the
/// caller already chose an sslmode.
pub fn ensure_tls(url: &str) -> String {
    if url.contains("sslmode=") {
        return url.to_string();
    }
    if url.contains('?') {
        format!("{url}&sslmode=require")
    } else {
        format!("{url}?sslmode=require")
    }
}

/// Read the newest message, if any.
///
/// The connection is scoped to this call: opened here, closed on every exit
/// path before the result is surfaced. No pooling, no transaction, no retry.
pub async fn latest_message(
    database_url: &str,
    timeout: Duration,
) -> Result<Option<Message>, BoardError> {
    let url = ensure_tls(database_url);

    let mut conn = tokio::time::timeout(timeout, PgConnection::connect(&url))
        .await
        .map_err(|_| BoardError::Timeout(timeout))??;

    let fetched = tokio::time::timeout(
        timeout,
        sqlx::query(LATEST_MESSAGE_SQL).fetch_optional(&mut conn),
    )
    .await;

    // Release the connection before surfacing any query error.
    conn.close().await.ok();

    let row = match fetched {
        Ok(result) => result?,
        Err(_) => return Err(BoardError::Timeout(timeout)),
    };

    match row {
        Some(row) => Ok(Some(Message {
            content: row.try_get("content")?,
            created_on: row.try_get("created_on")?,
        })),
        None => Ok(None),
    }
}
