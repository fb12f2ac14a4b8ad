use super::SessionStore;
use crate::core::types::SessionRecord;
use crate::error::StoreError;
use async_trait::async_trait;
use log::{debug, error, info};
use redis::aio::ConnectionManager;
use redis::Client;
use std::collections::HashMap;
use std::time::Duration;

/// Session store backed by Redis hashes, one hash per session id.
///
/// The connection manager is created once at boot and cloned per call; it
/// reconnects on its own after a dropped connection.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    session_ttl: Option<Duration>,
}

impl RedisSessionStore {
    pub async fn connect(redis_url: &str, session_ttl: Option<Duration>) -> Result<Self, StoreError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await.map_err(|err| {
            error!("Failed to connect to Redis at {}: {}", redis_url, err);
            StoreError::from(err)
        })?;
        info!("Connected to Redis session store");

        Ok(RedisSessionStore { conn, session_ttl })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn save_session(
        &self,
        session_id: &str,
        record: &SessionRecord,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let fields = record.to_fields();

        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("HSET")
            .arg(session_id)
            .arg(fields.as_slice())
            .ignore();
        if let Some(ttl) = self.session_ttl {
            pipe.cmd("EXPIRE").arg(session_id).arg(ttl.as_secs()).ignore();
        }

        pipe.query_async::<_, ()>(&mut conn).await.map_err(|err| {
            error!("Failed to store session {}: {}", session_id, err);
            StoreError::from(err)
        })?;
        debug!("Stored session {} (ttl: {:?})", session_id, self.session_ttl);
        Ok(())
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<SessionRecord>, StoreError> {
        let mut conn = self.conn.clone();
        let fields: HashMap<String, String> = redis::cmd("HGETALL")
            .arg(session_id)
            .query_async(&mut conn)
            .await
            .map_err(|err| {
                error!("Failed to read session {}: {}", session_id, err);
                StoreError::from(err)
            })?;

        Ok(SessionRecord::from_fields(fields))
    }
}
