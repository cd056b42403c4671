use async_trait::async_trait;

/// User confirmation gate for destructive operations.
///
/// Injected rather than tied to any particular dialog mechanism, so the
/// coordinator stays host-agnostic and tests can script the answer.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    /// Ask the user a yes/no question. `true` means proceed.
    async fn confirm(&self, message: &str) -> bool;

    /// Show a blocking error message.
    async fn alert(&self, message: &str);
}
