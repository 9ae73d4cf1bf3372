// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session store: token tiers, proactive refresh scheduling, single-flight refresh.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::auth::{
    AuthApi, AuthConfig, AuthenticationResponse, MessageResponse, SignInRequest, SignUpRequest,
    VerificationRequest,
};
use crate::config::ClientConfig;
use crate::error::{ApiError, RefreshError};
use crate::storage::{DurableStore, FileStore, StoredTokens, Tier, Tiers};
use crate::token::{decode_claims, Claims, TokenError};
use crate::{epoch_secs, http_client};

/// Events emitted by the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    /// Both tokens rotated.
    Refreshed,
    RefreshFailed { error: RefreshError },
    /// Local session cleared by an explicit logout.
    SignedOut,
    /// The session was purged after an unrecoverable auth failure; the user
    /// must be sent to the sign-in screen.
    SignInRequired { status: u16 },
    /// Signed out after the inactivity timeout.
    IdleTimeout,
}

type RefreshOutcome = Result<StoredTokens, RefreshError>;
type RefreshFlight = Shared<BoxFuture<'static, RefreshOutcome>>;

/// Single-flight refresh state.
enum RefreshState {
    Idle,
    Refreshing(RefreshFlight),
}

/// Token tiers plus a generation counter bumped on every replace or purge,
/// so a refresh that outlives its session can tell.
struct SessionState {
    tiers: Tiers,
    generation: u64,
}

/// Owns the access/refresh token pair and keeps it fresh.
///
/// Construct once per application and share the `Arc`.
pub struct SessionStore {
    state: Mutex<SessionState>,
    durable: Arc<dyn DurableStore>,
    auth: AuthApi,
    refresh_state: Mutex<RefreshState>,
    /// Cancels the pending proactive refresh timer.
    scheduled: Mutex<Option<CancellationToken>>,
    refresh_margin: Duration,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    /// Create a store over `durable`, restoring any remembered session.
    ///
    /// When a token is restored and a tokio runtime is available, a proactive
    /// refresh is scheduled right away.
    pub fn new(config: &ClientConfig, durable: Arc<dyn DurableStore>) -> Arc<Self> {
        let tiers = match durable.load() {
            Ok(Some(persisted)) => Tiers::from_persisted(persisted),
            Ok(None) => Tiers::default(),
            Err(e) => {
                warn!(err = %e, "failed to load persisted session, starting signed out");
                Tiers::default()
            }
        };
        let (event_tx, _) = broadcast::channel(64);
        let http = http_client(config.request_timeout());
        let store = Arc::new(Self {
            state: Mutex::new(SessionState { tiers, generation: 0 }),
            durable,
            auth: AuthApi::new(config.base_url(), http),
            refresh_state: Mutex::new(RefreshState::Idle),
            scheduled: Mutex::new(None),
            refresh_margin: config.refresh_margin(),
            event_tx,
        });
        if let Some(access) = store.access_token() {
            store.schedule_refresh(&access);
        }
        store
    }

    /// Create a store persisting to `<state_dir>/session.json`.
    pub fn open(config: &ClientConfig) -> Arc<Self> {
        Self::new(config, Arc::new(FileStore::in_dir(&config.state_dir())))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    pub(crate) fn emit(&self, event: SessionEvent) {
        let _ = self.event_tx.send(event);
    }

    // -- Token access -----------------------------------------------------------

    /// Access token from the tier selected by the remember-me flag.
    pub fn access_token(&self) -> Option<String> {
        self.state.lock().tiers.active().map(|t| t.access_token.clone())
    }

    /// Refresh token from the tier selected by the remember-me flag.
    pub fn refresh_token(&self) -> Option<String> {
        self.state.lock().tiers.active().map(|t| t.refresh_token.clone())
    }

    pub fn remember_me(&self) -> bool {
        self.state.lock().tiers.remember_me
    }

    /// Snapshot of one storage tier, regardless of which one is active.
    pub fn tier_tokens(&self, tier: Tier) -> Option<StoredTokens> {
        self.state.lock().tiers.get(tier).cloned()
    }

    /// True when either token is present.
    pub fn has_tokens(&self) -> bool {
        self.state.lock().tiers.active().is_some()
    }

    /// Decoded claims of the current access token (`Ok(None)` when signed out).
    pub fn claims(&self) -> Result<Option<Claims>, TokenError> {
        self.access_token().map(|t| decode_claims(&t)).transpose()
    }

    /// True only for a present, decodable, unexpired access token.
    ///
    /// A merely expired token is left in place (a refresh may still revive
    /// it); a token that does not decode purges the session.
    pub fn is_authenticated(&self) -> bool {
        let Some(token) = self.access_token() else {
            return false;
        };
        match decode_claims(&token) {
            Ok(claims) => claims.is_live_at(epoch_secs()),
            Err(e) => {
                warn!(err = %e, "access token failed to decode, purging session");
                self.purge_session();
                false
            }
        }
    }

    // -- Mutation ---------------------------------------------------------------

    /// Store a token pair in the tier chosen by `remember_me`, clear the other
    /// tier, and reschedule the proactive refresh.
    pub fn set_tokens(self: &Arc<Self>, access: String, refresh: String, remember_me: bool) {
        {
            let mut state = self.state.lock();
            let tokens = StoredTokens { access_token: access.clone(), refresh_token: refresh };
            state.tiers.store(tokens, remember_me);
            state.generation += 1;
            self.persist(&state.tiers);
        }
        self.schedule_refresh(&access);
    }

    /// Clear both tiers and the remember-me flag; cancel the refresh timer.
    pub fn purge_session(&self) {
        self.cancel_scheduled();
        let mut state = self.state.lock();
        state.tiers.purge();
        state.generation += 1;
        if let Err(e) = self.durable.clear() {
            warn!(err = %e, "failed to clear persisted session");
        }
    }

    /// Purge and tell listeners to send the user to sign-in.
    pub fn require_sign_in(&self, status: u16) {
        self.purge_session();
        self.emit(SessionEvent::SignInRequired { status });
    }

    /// Write the durable half of `tiers`. Caller holds the state lock so
    /// writes land in the same order as the in-memory updates.
    fn persist(&self, tiers: &Tiers) {
        let record = tiers.persisted();
        let result = if record == Default::default() {
            self.durable.clear()
        } else {
            self.durable.save(&record)
        };
        if let Err(e) = result {
            warn!(err = %e, "failed to persist session");
        }
    }

    // -- Refresh ----------------------------------------------------------------

    /// Renew the token pair, sharing one network call among concurrent callers.
    ///
    /// Every caller that arrives while a refresh is in flight gets that
    /// refresh's outcome. The flight runs as its own task and resets to idle
    /// before its outcome is delivered.
    pub async fn refresh(self: &Arc<Self>) -> Result<StoredTokens, RefreshError> {
        let flight = {
            let mut state = self.refresh_state.lock();
            match &*state {
                RefreshState::Refreshing(flight) => {
                    debug!("joining in-flight token refresh");
                    flight.clone()
                }
                RefreshState::Idle => {
                    let store = Arc::clone(self);
                    let task = tokio::spawn(async move {
                        let outcome = store.run_refresh().await;
                        *store.refresh_state.lock() = RefreshState::Idle;
                        outcome
                    });
                    let store = Arc::clone(self);
                    let flight = async move {
                        match task.await {
                            Ok(outcome) => outcome,
                            Err(e) => {
                                // The task died before resetting the state.
                                warn!(err = %e, "refresh task failed");
                                *store.refresh_state.lock() = RefreshState::Idle;
                                Err(RefreshError::Aborted)
                            }
                        }
                    }
                    .boxed()
                    .shared();
                    *state = RefreshState::Refreshing(flight.clone());
                    flight
                }
            }
        };
        flight.await
    }

    /// True while a refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        matches!(*self.refresh_state.lock(), RefreshState::Refreshing(_))
    }

    async fn run_refresh(self: &Arc<Self>) -> RefreshOutcome {
        let (refresh_token, generation) = {
            let state = self.state.lock();
            (state.tiers.active().map(|t| t.refresh_token.clone()), state.generation)
        };

        let result = match refresh_token {
            Some(token) => self.auth.refresh(&token).await.map_err(RefreshError::from),
            None => Err(RefreshError::NoRefreshToken),
        };

        match result {
            Ok(resp) => {
                let tokens = StoredTokens {
                    access_token: resp.access_token,
                    refresh_token: resp.refresh_token,
                };
                if !self.store_if_current(&tokens, generation) {
                    debug!("session replaced during refresh, discarding rotated tokens");
                    return Err(RefreshError::Aborted);
                }
                self.schedule_refresh(&tokens.access_token);
                self.emit(SessionEvent::Refreshed);
                info!("access token refreshed");
                Ok(tokens)
            }
            Err(err) => {
                if !self.purge_if_current(generation) {
                    debug!(err = %err, "session replaced during failed refresh, keeping it");
                    return Err(RefreshError::Aborted);
                }
                warn!(err = %err, "token refresh failed");
                self.emit(SessionEvent::RefreshFailed { error: err.clone() });
                Err(err)
            }
        }
    }

    /// Store rotated tokens, keeping the remember-me choice, unless the session
    /// changed since `generation` was read.
    fn store_if_current(&self, tokens: &StoredTokens, generation: u64) -> bool {
        let mut state = self.state.lock();
        if state.generation != generation {
            return false;
        }
        let remember_me = state.tiers.remember_me;
        state.tiers.store(tokens.clone(), remember_me);
        state.generation += 1;
        self.persist(&state.tiers);
        true
    }

    /// Purge unless the session changed since `generation`; true if purged.
    fn purge_if_current(&self, generation: u64) -> bool {
        let current = self.state.lock().generation == generation;
        if current {
            self.purge_session();
        }
        current
    }

    // -- Scheduling -------------------------------------------------------------

    fn cancel_scheduled(&self) {
        if let Some(cancel) = self.scheduled.lock().take() {
            cancel.cancel();
        }
    }

    /// Arm the proactive refresh timer for `access`: `refresh_margin` before
    /// its expiry, or immediately if already inside that window and a refresh
    /// token exists.
    fn schedule_refresh(self: &Arc<Self>, access: &str) {
        self.cancel_scheduled();

        let claims = match decode_claims(access) {
            Ok(c) => c,
            Err(e) => {
                warn!(err = %e, "cannot schedule refresh for undecodable token");
                return;
            }
        };
        let now = epoch_secs();
        let fire_at = claims.exp.saturating_sub(self.refresh_margin.as_secs());
        let delay = if fire_at > now {
            Duration::from_secs(fire_at - now)
        } else if self.refresh_token().is_some() {
            Duration::ZERO
        } else {
            debug!("token inside refresh window without a refresh token");
            return;
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("no runtime, proactive refresh not scheduled");
            return;
        };

        let cancel = CancellationToken::new();
        if let Some(previous) = self.scheduled.lock().replace(cancel.clone()) {
            previous.cancel();
        }

        debug!(in_secs = delay.as_secs(), "scheduled token refresh");
        let store = Arc::downgrade(self);
        handle.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
            let Some(store) = store.upgrade() else {
                return;
            };
            let mut outcome = store.refresh().await;
            // Joined a flight for a replaced session; this timer still owns the new one.
            if matches!(outcome, Err(RefreshError::Aborted)) && !cancel.is_cancelled() {
                debug!("joined a stale refresh, starting a new one");
                outcome = store.refresh().await;
            }
            match outcome {
                Ok(_) | Err(RefreshError::Aborted) => {}
                Err(e) => warn!(err = %e, "scheduled refresh failed"),
            }
        });
    }

    // -- Auth endpoints ---------------------------------------------------------

    /// Sign in and store the returned pair in the tier chosen by `remember_me`.
    pub async fn sign_in(
        self: &Arc<Self>,
        req: &SignInRequest,
        remember_me: bool,
    ) -> Result<AuthenticationResponse, ApiError> {
        let resp = self.auth.sign_in(req).await?;
        self.set_tokens(resp.access_token.clone(), resp.refresh_token.clone(), remember_me);
        self.emit(SessionEvent::SignedIn);
        info!(remember_me, "signed in");
        Ok(resp)
    }

    pub async fn sign_up(&self, req: &SignUpRequest) -> Result<MessageResponse, ApiError> {
        self.auth.sign_up(req).await
    }

    pub async fn verify(&self, req: &VerificationRequest) -> Result<MessageResponse, ApiError> {
        self.auth.verify(req).await
    }

    pub async fn resend_verification(&self, email: &str) -> Result<MessageResponse, ApiError> {
        self.auth.resend_verification(email).await
    }

    pub async fn auth_config(&self) -> Result<AuthConfig, ApiError> {
        self.auth.config().await
    }

    /// Best-effort server logout, then always clear the local session.
    pub async fn logout(&self) {
        let (access, refresh) = {
            let state = self.state.lock();
            let active = state.tiers.active();
            (active.map(|t| t.access_token.clone()), active.map(|t| t.refresh_token.clone()))
        };
        if let Some(refresh) = refresh {
            if let Err(e) = self.auth.logout(access.as_deref(), &refresh).await {
                warn!(err = %e, "logout request failed, clearing local session anyway");
            }
        }
        self.purge_session();
        self.emit(SessionEvent::SignedOut);
        info!("signed out");
    }

    /// Revoke every session of this user; local state is cleared only on success.
    pub async fn logout_all(&self) -> Result<MessageResponse, ApiError> {
        let resp = self.auth.logout_all(self.access_token().as_deref()).await?;
        self.purge_session();
        self.emit(SessionEvent::SignedOut);
        info!("signed out of all devices");
        Ok(resp)
    }
}
