//! Response hooks for cross-cutting failures
//!
//! The gateway notifies every registered hook when a response comes back
//! 401. Each registration yields a [`HookHandle`]; dropping the handle (or
//! calling [`HookHandle::dispose`]) removes that one hook and leaves the
//! others in place, so an owner's teardown is deterministic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Callback invoked when the backend rejects a credential
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    hooks: Mutex<Vec<(u64, UnauthorizedHook)>>,
}

impl Registry {
    fn hooks(&self) -> MutexGuard<'_, Vec<(u64, UnauthorizedHook)>> {
        self.hooks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, id: u64) {
        self.hooks().retain(|(hook_id, _)| *hook_id != id);
    }
}

/// Shared registry of unauthorized-response hooks
#[derive(Clone, Default)]
pub struct ResponseHooks {
    registry: Arc<Registry>,
}

impl ResponseHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook; it stays installed until the returned handle goes away
    pub fn register(&self, hook: UnauthorizedHook) -> HookHandle {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry.hooks().push((id, hook));
        log::debug!("Registered unauthorized hook #{}", id);

        HookHandle {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Fire every registered hook.
    ///
    /// Hooks run outside the registry lock so a hook may register or dispose
    /// others.
    pub fn notify_unauthorized(&self) {
        let hooks: Vec<UnauthorizedHook> = self
            .registry
            .hooks()
            .iter()
            .map(|(_, hook)| Arc::clone(hook))
            .collect();

        log::debug!("Unauthorized response, notifying {} hook(s)", hooks.len());
        for hook in hooks {
            hook();
        }
    }

    /// Number of installed hooks
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.registry.hooks().len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Disposer for one registered hook
#[must_use = "dropping the handle removes the hook immediately"]
pub struct HookHandle {
    id: u64,
    registry: Weak<Registry>,
}

impl HookHandle {
    /// Remove the hook now
    pub fn dispose(self) {}
}

impl Drop for HookHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
            log::debug!("Disposed unauthorized hook #{}", self.id);
        }
    }
}

impl std::fmt::Debug for HookHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookHandle").field("id", &self.id).finish()
    }
}
