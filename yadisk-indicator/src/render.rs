//! The rendering host's side of the contract.

use yadisk_core::IndicatorViewModel;

/// Receives every published view. Implementations draw the icon, the action
/// item and the status line; they must not block.
pub trait Renderer: Send + Sync {
    fn render(&self, view: &IndicatorViewModel);

    /// Called once when the indicator is disabled and the binding is dropped.
    fn release(&self) {}
}
