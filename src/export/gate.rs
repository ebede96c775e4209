use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::foundation::error::{PhotoverseError, PhotoverseResult};

/// Single-flight flag for exports from one result view.
///
/// Cloning shares the flag.
#[derive(Clone, Debug, Default)]
pub struct ExportGate {
    busy: Arc<AtomicBool>,
}

impl ExportGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Claim the gate, or fail with [`PhotoverseError::Busy`] if an export is in flight.
    pub fn try_begin(&self) -> PhotoverseResult<ExportGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PhotoverseError::Busy)?;
        Ok(ExportGuard {
            busy: Arc::clone(&self.busy),
        })
    }
}

/// Releases the gate when dropped, on success, error or unwind alike.
#[derive(Debug)]
pub struct ExportGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/gate.rs"]
mod tests;
