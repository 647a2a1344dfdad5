use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::AbortHandle;

use super::{AccessRequirement, AccessState, Decision, IdentityResolver, evaluate};
use crate::{Principal, TeamMemberRepository};

/// Live access state for one signed-in surface.
///
/// Constructed explicitly and handed to whatever needs it. [`begin`] starts
/// resolving a principal in a background task, [`teardown`] aborts it and
/// signs the surface out. Only the most recent resolution may publish a
/// result: a lookup that was superseded by a later `begin` or `teardown` is
/// dropped even if it completes.
///
/// Starts out [`AccessState::Loading`].
///
/// [`begin`]: AccessSession::begin
/// [`teardown`]: AccessSession::teardown
pub struct AccessSession<M> {
    resolver: IdentityResolver<M>,
    state: Arc<watch::Sender<AccessState>>,
    generation: Arc<AtomicU64>,
    task: Mutex<Option<AbortHandle>>,
}

impl<M> AccessSession<M>
where
    M: TeamMemberRepository + Clone + 'static,
{
    pub fn new(resolver: IdentityResolver<M>) -> Self {
        let (state, _) = watch::channel(AccessState::Loading);

        Self {
            resolver,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            task: Mutex::new(None),
        }
    }

    /// Resolves `principal` in the background. Any resolution still in
    /// flight is aborted and the state goes back to `Loading`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn begin(&self, principal: Option<Principal>) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(AccessState::Loading);

        let resolver = self.resolver.clone();
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);

        let handle = tokio::spawn(async move {
            let identity = resolver.resolve(principal).await;

            let published = state.send_if_modified(|slot| {
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *slot = AccessState::Resolved(identity);
                true
            });

            if !published {
                log::debug!(
                    target: "dashgate::access",
                    "msg=\"discarding superseded identity resolution\" generation={generation}"
                );
            }
        });

        self.replace_task(Some(handle.abort_handle()));
    }

    /// Aborts any in-flight resolution and resets to anonymous.
    pub fn teardown(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.replace_task(None);
        self.state.send_replace(AccessState::anonymous());
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AccessState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<AccessState> {
        self.state.subscribe()
    }

    /// Waits until the state leaves `Loading` and returns it.
    ///
    /// With no lookup timeout configured, a hung member store keeps this
    /// pending.
    pub async fn wait_resolved(&self) -> AccessState {
        let mut receiver = self.state.subscribe();
        match receiver.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// Evaluates `requirement` against the current state.
    pub fn evaluate(&self, requirement: &AccessRequirement) -> Decision {
        evaluate(requirement, &self.state.borrow())
    }

    pub fn resolver(&self) -> &IdentityResolver<M> {
        &self.resolver
    }

    fn replace_task(&self, next: Option<AbortHandle>) {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = std::mem::replace(&mut *task, next) {
            previous.abort();
        }
    }
}

impl<M> Drop for AccessSession<M> {
    fn drop(&mut self) {
        let task = self.task.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = task.take() {
            handle.abort();
        }
    }
}
