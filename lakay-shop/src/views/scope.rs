//! View lifetime scope

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::{ShopError, ShopResult};

/// Cancellation scope tied to a view's lifetime
///
/// Child scopes are cancelled together with their parent, so cancelling the
/// application-level scope tears every view down.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope for a nested view
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run `fut` unless the scope is cancelled first
    pub async fn run<F, T, E>(&self, fut: F) -> ShopResult<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<ShopError>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(ShopError::Cancelled),
            result = fut => result.map_err(Into::into),
        }
    }
}
