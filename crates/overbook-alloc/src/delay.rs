//! Injectable latency for widening race windows.
//!
//! The unsync and locked allocators call [`DelayHook::pause`] at two fixed
//! points of their read-check-write sequence. Production wiring uses
//! [`DelayHook::none`]; the demo uses random sleeps; tests install custom
//! hooks (e.g. a barrier) to force a specific interleaving.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use rand::Rng;

use overbook_core::config::delay::{DelayConfig, DelayMode};

/// Where in the booking sequence a delay is injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelayPoint {
    /// After the seat count was read, before it is compared.
    AfterRead,
    /// After the comparison passed, before the seat count is written.
    AfterCheck,
}

impl fmt::Display for DelayPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelayPoint::AfterRead => write!(f, "after_read"),
            DelayPoint::AfterCheck => write!(f, "after_check"),
        }
    }
}

type HookFn = dyn Fn(DelayPoint) -> BoxFuture<'static, ()> + Send + Sync;

/// Async function invoked at each [`DelayPoint`].
#[derive(Clone)]
pub struct DelayHook {
    label: &'static str,
    func: Option<Arc<HookFn>>,
}

impl DelayHook {
    /// Delay points return immediately.
    pub fn none() -> Self {
        Self {
            label: "none",
            func: None,
        }
    }

    /// Sleep for `duration` at every delay point.
    pub fn fixed(duration: Duration) -> Self {
        let mut hook = Self::custom(move |_| tokio::time::sleep(duration));
        hook.label = "fixed";
        hook
    }

    /// Sleep for a uniformly random duration in `[min, max]` at every delay point.
    pub fn random(min: Duration, max: Duration) -> Self {
        let mut hook = Self::custom(move |_| {
            let wait = if max > min {
                rand::thread_rng().gen_range(min..=max)
            } else {
                min
            };
            tokio::time::sleep(wait)
        });
        hook.label = "random";
        hook
    }

    /// Run an arbitrary future at every delay point.
    pub fn custom<F, Fut>(f: F) -> Self
    where
        F: Fn(DelayPoint) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let func: Arc<HookFn> =
            Arc::new(move |point: DelayPoint| -> BoxFuture<'static, ()> { Box::pin(f(point)) });
        Self {
            label: "custom",
            func: Some(func),
        }
    }

    /// Build the hook described by a `[delay]` config section.
    pub fn from_config(config: &DelayConfig) -> Self {
        match config.mode {
            DelayMode::None => Self::none(),
            DelayMode::Fixed => Self::fixed(Duration::from_millis(config.fixed_ms)),
            DelayMode::Random => Self::random(
                Duration::from_millis(config.min_ms),
                Duration::from_millis(config.max_ms),
            ),
        }
    }

    /// Wait at a delay point.
    pub async fn pause(&self, point: DelayPoint) {
        if let Some(func) = &self.func {
            func(point).await;
        }
    }

    /// Whether this hook never waits.
    pub fn is_none(&self) -> bool {
        self.func.is_none()
    }
}

impl Default for DelayHook {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for DelayHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayHook").field("label", &self.label).finish()
    }
}
