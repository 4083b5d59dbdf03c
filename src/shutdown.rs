//! Exit Hooks
//!
//! Cleanup registered during startup and run once when the process exits,
//! most recent registration first. A failing hook is logged and does not
//! prevent the remaining hooks from running.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};

use tracing::{error, info};

/// Error returned by an exit hook
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

type HookFuture = Pin<Box<dyn Future<Output = Result<(), HookError>> + Send>>;
type Hook = Box<dyn FnOnce() -> HookFuture + Send>;

/// Ordered set of exit hooks
#[derive(Default)]
pub struct ShutdownHooks {
    hooks: Mutex<Vec<(String, Hook)>>,
}

impl ShutdownHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook to run before exit.
    pub fn before_exit<F, Fut>(&self, name: impl Into<String>, hook: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), HookError>> + Send + 'static,
    {
        let hook: Hook = Box::new(move || Box::pin(hook()));
        self.hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((name.into(), hook));
    }

    /// Number of hooks still pending
    pub fn len(&self) -> usize {
        self.hooks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run all pending hooks in reverse registration order. Hooks run at
    /// most once; later calls only see hooks registered since.
    pub async fn run(&self) {
        let hooks = std::mem::take(&mut *self.hooks.lock().unwrap_or_else(PoisonError::into_inner));

        for (name, hook) in hooks.into_iter().rev() {
            info!(hook = %name, "running exit hook");
            if let Err(err) = hook().await {
                error!(hook = %name, error = %err, "exit hook failed");
            }
        }
    }
}
