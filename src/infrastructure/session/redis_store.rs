//! Redis-backed session store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisResult, aio::ConnectionManager};
use std::fmt;
use time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};
use tracing::{debug, info};

/// Session store keeping JSON-encoded session records in Redis.
///
/// Each record is written with a TTL matching its expiry date, so Redis
/// drops idle sessions by itself. Uses `ConnectionManager` for connection
/// reuse and reconnects.
#[derive(Clone)]
pub struct RedisSessionStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

impl RedisSessionStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection cannot be
    /// established, or the PING fails.
    pub async fn connect(redis_url: &str) -> RedisResult<Self> {
        info!("Connecting to Redis session store");

        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut test_conn = manager.clone();
        test_conn.ping::<()>().await?;

        info!("Connected to Redis session store");

        Ok(Self {
            client: manager,
            key_prefix: "jtrac:session:".to_string(),
        })
    }

    fn build_key(&self, session_id: &Id) -> String {
        format!("{}{}", self.key_prefix, session_id)
    }
}

fn backend_error(e: redis::RedisError) -> session_store::Error {
    session_store::Error::Backend(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let ttl = (record.expiry_date - OffsetDateTime::now_utc()).whole_seconds();
        if ttl <= 0 {
            return self.delete(&record.id).await;
        }

        let json = serde_json::to_string(record)
            .map_err(|e| session_store::Error::Encode(e.to_string()))?;
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(self.build_key(&record.id), json, ttl as u64)
            .await
            .map_err(backend_error)
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let mut conn = self.client.clone();

        let raw = conn
            .get::<_, Option<String>>(self.build_key(session_id))
            .await
            .map_err(backend_error)?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| session_store::Error::Decode(e.to_string())),
            None => {
                debug!("Session not found in Redis");
                Ok(None)
            }
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        let mut conn = self.client.clone();

        conn.del::<_, i32>(self.build_key(session_id))
            .await
            .map(|_| ())
            .map_err(backend_error)
    }
}
