//! Process-wide "abort all outstanding requests" capability

use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

/// Cancels every in-flight request of a fragments client
pub trait AbortAll: Send + Sync {
    fn abort_all(&self);
}

/// Hands out request tokens that can all be cancelled at once
///
/// Every token is a child of the current generation. Aborting cancels that
/// generation and starts a fresh one, so requests registered afterwards are
/// unaffected.
#[derive(Debug, Clone, Default)]
pub struct AbortRegistry {
    generation: Arc<Mutex<CancellationToken>>,
}

impl AbortRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token for one request, cancelled by the next `abort_all`
    pub fn register(&self) -> CancellationToken {
        match self.generation.lock() {
            Ok(generation) => generation.child_token(),
            Err(poisoned) => poisoned.into_inner().child_token(),
        }
    }
}

impl AbortAll for AbortRegistry {
    fn abort_all(&self) {
        let mut generation = match self.generation.lock() {
            Ok(generation) => generation,
            Err(poisoned) => poisoned.into_inner(),
        };
        generation.cancel();
        *generation = CancellationToken::new();
        log::debug!("Aborted all outstanding fragment requests");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abort_all_cancels_registered_tokens() {
        let registry = AbortRegistry::new();
        let first = registry.register();
        let second = registry.register();

        registry.abort_all();

        assert!(first.is_cancelled());
        assert!(second.is_cancelled());
    }

    #[test]
    fn test_tokens_registered_after_abort_stay_live() {
        let registry = AbortRegistry::new();
        registry.abort_all();

        let token = registry.register();

        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_clones_share_generation() {
        let registry = AbortRegistry::new();
        let token = registry.clone().register();

        registry.abort_all();

        assert!(token.is_cancelled());
    }
}
