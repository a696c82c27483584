//! 会话存储
//!
//! In-process map from opaque cookie token to the signed-in staff member.
//! Sessions expire after an idle TTL and are lost on restart.

use dashmap::DashMap;
use shared::models::SessionInfo;
use shared::util::{MINUTE_MS, now_millis};

#[derive(Debug, Clone)]
struct SessionEntry {
    info: SessionInfo,
    last_seen: i64,
}

/// Token → session map with idle expiry
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, SessionEntry>,
    ttl_ms: i64,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl_ms: ttl_minutes.max(1).saturating_mul(MINUTE_MS),
        }
    }

    /// Create a session and return its token (UUID v4)
    pub fn insert(&self, info: SessionInfo) -> String {
        self.insert_at(info, now_millis())
    }

    /// Look up a live session, refreshing its idle timer
    pub fn get(&self, token: &str) -> Option<SessionInfo> {
        self.get_at(token, now_millis())
    }

    pub fn remove(&self, token: &str) -> Option<SessionInfo> {
        self.sessions.remove(token).map(|(_, entry)| entry.info)
    }

    /// Drop every expired session; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(now_millis())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn insert_at(&self, info: SessionInfo, now: i64) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            SessionEntry {
                info,
                last_seen: now,
            },
        );
        token
    }

    fn get_at(&self, token: &str, now: i64) -> Option<SessionInfo> {
        {
            let mut entry = self.sessions.get_mut(token)?;
            if now - entry.last_seen < self.ttl_ms {
                entry.last_seen = now;
                return Some(entry.info.clone());
            }
        }
        // 过期: 释放写锁后再删除
        self.sessions.remove(token);
        None
    }

    fn purge_expired_at(&self, now: i64) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| now - entry.last_seen < self.ttl_ms);
        before.saturating_sub(self.sessions.len())
    }
}
