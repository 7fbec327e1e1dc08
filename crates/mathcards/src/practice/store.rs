//! In-memory session store.
//!
//! Sessions live for the lifetime of the process. Each session sits behind its
//! own mutex, so answers to one session are applied one at a time while other
//! sessions proceed in parallel.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use mathcards_common::constants::SESSION_ID_BYTES;
use mathcards_common::{MathcardsError, PracticeSettings, SessionId, SessionView, StartedSession};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};

use super::generator;
use super::session::Session;
use crate::config::PracticeConfig;

/// Session store service
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
    /// Source for operands, operators, and session ids
    rng: Mutex<StdRng>,
    /// Optional cap on problems per session
    max_operations: Option<usize>,
    answers_recorded: AtomicU64,
}

/// Snapshot of store statistics
#[derive(Clone, Debug, Default, Serialize)]
pub struct StoreStats {
    pub sessions: usize,
    pub active_sessions: usize,
    pub finished_sessions: usize,
    pub answers_recorded: u64,
}

impl SessionStore {
    pub fn new(config: &PracticeConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(rng, config.max_operations)
    }

    pub fn with_rng(rng: StdRng, max_operations: Option<usize>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            rng: Mutex::new(rng),
            max_operations,
            answers_recorded: AtomicU64::new(0),
        }
    }

    /// Generate a new session and store it under a fresh id
    pub async fn start(&self, settings: PracticeSettings) -> StartedSession {
        let requested = settings.requested_count();
        let count = match self.max_operations {
            Some(max) if requested > max => {
                tracing::warn!(requested = requested, max = max, "Requested session too long, clamping");
                max
            }
            _ => requested,
        };
        if !settings.difficulty.is_recognized() {
            tracing::debug!(
                difficulty = settings.difficulty.value(),
                "Unknown difficulty, using fallback stages"
            );
        }

        let (operations, mut session_id) = {
            let mut rng = self.rng.lock().await;
            let operations = generator::generate(settings.mode, settings.difficulty, count, &mut *rng);
            (operations, mint_session_id(&mut *rng))
        };
        let session = Arc::new(Mutex::new(Session::new(operations)));
        let total = count;

        // The map is locked only to check the id and insert; a colliding id is
        // redrawn with the map released.
        loop {
            let mut sessions = self.sessions.write().await;
            if !sessions.contains_key(session_id.as_str()) {
                sessions.insert(session_id.clone(), session);
                break;
            }
            drop(sessions);

            tracing::warn!(session_id = %session_id, "Session id collision, minting another");
            session_id = mint_session_id(&mut *self.rng.lock().await);
        }

        tracing::debug!(
            session_id = %session_id,
            mode = ?settings.mode,
            difficulty = settings.difficulty.value(),
            total = total,
            "Started practice session"
        );

        StartedSession { session_id, total }
    }

    /// Current problem (or final results) of a session
    pub async fn peek(&self, session_id: &str) -> Result<SessionView, MathcardsError> {
        let session = self.get(session_id).await?;
        let session = session.lock().await;
        Ok(session.view())
    }

    /// Grade an answer to the current problem and advance the session
    pub async fn answer(&self, session_id: &str, answer: i64) -> Result<SessionView, MathcardsError> {
        let session = self.get(session_id).await?;
        let mut session = session.lock().await;

        match session.submit(answer) {
            Some(record) => {
                self.answers_recorded.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    session_id = %session_id,
                    answer = answer,
                    expected = record.expected,
                    correct = record.correct,
                    answered = session.cursor(),
                    total = session.total(),
                    "Answer recorded"
                );
            }
            None => {
                tracing::debug!(session_id = %session_id, "Answer ignored, session already finished");
            }
        }

        Ok(session.view())
    }

    /// Fails with `NotFound` unless the session exists
    pub async fn ensure_exists(&self, session_id: &str) -> Result<(), MathcardsError> {
        self.get(session_id).await.map(|_| ())
    }

    /// Get statistics snapshot
    pub async fn stats(&self) -> StoreStats {
        let handles: Vec<Arc<Mutex<Session>>> = self.sessions.read().await.values().cloned().collect();

        let mut stats = StoreStats {
            sessions: handles.len(),
            answers_recorded: self.answers_recorded.load(Ordering::Relaxed),
            ..Default::default()
        };
        for handle in handles {
            if handle.lock().await.is_finished() {
                stats.finished_sessions += 1;
            } else {
                stats.active_sessions += 1;
            }
        }
        stats
    }

    async fn get(&self, session_id: &str) -> Result<Arc<Mutex<Session>>, MathcardsError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| MathcardsError::NotFound(session_id.to_string()))
    }
}

/// Mint a random URL-safe session id
fn mint_session_id(rng: &mut impl Rng) -> SessionId {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    rng.fill(&mut bytes);
    SessionId::new(URL_SAFE_NO_PAD.encode(bytes))
}
