use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Process-wide switch that keeps the build-tool integration from
/// auto-importing linked projects.
///
/// Shared between sessions and the integration via `Arc`. Code that needs
/// auto-import for a while takes an [`AutoImportGuard`] instead of flipping
/// the switch by hand. Auto-import stays enabled while any guard is alive,
/// whatever order overlapping guards are dropped in.
#[derive(Debug)]
pub struct AutoImportRegistry {
    disabled_by_default: bool,
    enabled_scopes: AtomicUsize,
}

impl AutoImportRegistry {
    pub fn new(disabled: bool) -> Self {
        Self {
            disabled_by_default: disabled,
            enabled_scopes: AtomicUsize::new(0),
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled_by_default && self.enabled_scopes.load(Ordering::SeqCst) == 0
    }

    /// Enable auto-import until the returned guard is dropped
    pub fn enable_scoped(&self) -> AutoImportGuard<'_> {
        let active = self.enabled_scopes.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Auto-import enabled for scope ({} active)", active);
        AutoImportGuard { registry: self }
    }
}

impl Default for AutoImportRegistry {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Releases one enable scope on drop, on every exit path
#[must_use = "auto-import is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct AutoImportGuard<'a> {
    registry: &'a AutoImportRegistry,
}

impl Drop for AutoImportGuard<'_> {
    fn drop(&mut self) {
        let remaining = self.registry.enabled_scopes.fetch_sub(1, Ordering::SeqCst) - 1;
        debug!(
            "Auto-import scope released ({} active, disabled: {})",
            remaining,
            self.registry.is_disabled()
        );
    }
}
