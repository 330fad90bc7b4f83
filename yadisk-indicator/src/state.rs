//! The single shared view-model slot.
//!
//! Any number of refresh cycles may be in flight; each one publishes when it
//! finishes, and the last publish wins. There is no fencing on trigger order:
//! a poll that started before a toggle but finishes after it overwrites the
//! toggle's result.

use std::sync::Arc;

use tokio::sync::RwLock;

use yadisk_core::{transition, IndicatorViewModel, Transition};

use crate::render::Renderer;

/// What a single [`ViewModelSlot::publish`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Published {
    /// Monotonic publish counter; the initial view is generation 0.
    pub generation: u64,
    pub transition: Option<Transition>,
    pub rendered: bool,
}

struct SlotInner {
    view: IndicatorViewModel,
    generation: u64,
    renderer: Option<Arc<dyn Renderer>>,
}

/// Cloneable handle to the latest [`IndicatorViewModel`] and its render binding.
#[derive(Clone)]
pub struct ViewModelSlot {
    inner: Arc<RwLock<SlotInner>>,
}

impl Default for ViewModelSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModelSlot {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SlotInner {
                view: IndicatorViewModel::initial(),
                generation: 0,
                renderer: None,
            })),
        }
    }

    pub async fn current(&self) -> IndicatorViewModel {
        self.inner.read().await.view.clone()
    }

    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    /// Attach a renderer and immediately draw the current view with it.
    pub async fn bind(&self, renderer: Arc<dyn Renderer>) {
        let mut guard = self.inner.write().await;
        renderer.render(&guard.view);
        guard.renderer = Some(renderer);
    }

    /// Drop the render binding. Later publishes still update the slot.
    pub async fn detach(&self) -> Option<Arc<dyn Renderer>> {
        self.inner.write().await.renderer.take()
    }

    /// Overwrite the stored view and deliver it to the bound renderer.
    ///
    /// Rendering happens under the write lock, so the order views reach the
    /// renderer is the order they were stored in.
    pub async fn publish(&self, view: IndicatorViewModel) -> Published {
        let mut guard = self.inner.write().await;
        let change = transition(guard.view.state(), view.state());
        guard.generation += 1;
        guard.view = view;

        let rendered = match guard.renderer.as_ref() {
            Some(renderer) => {
                renderer.render(&guard.view);
                true
            }
            None => false,
        };

        Published {
            generation: guard.generation,
            transition: change,
            rendered,
        }
    }
}
