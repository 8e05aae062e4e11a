//! Ordered fallback chains.
//!
//! Most install decisions take the same shape: walk a fixed priority list
//! and use the first entry that is usable on this machine. When nothing
//! applies, the caller reports an unsupported platform.

use std::path::PathBuf;

use crate::host::Host;

/// Something that may or may not be usable on the current host.
pub trait Candidate {
    /// Short name for logs and messages.
    fn label(&self) -> String;

    /// Probe the host for this candidate.
    fn is_available(&self, host: &dyn Host) -> bool;
}

/// Return the first available candidate, in priority order.
pub fn first_available<'a, C: Candidate>(candidates: &'a [C], host: &dyn Host) -> Option<&'a C> {
    candidates.iter().find(|candidate| {
        let available = candidate.is_available(host);
        tracing::debug!(
            "Candidate {}: {}",
            candidate.label(),
            if available { "available" } else { "not available" }
        );
        available
    })
}

impl Candidate for PathBuf {
    fn label(&self) -> String {
        self.display().to_string()
    }

    fn is_available(&self, host: &dyn Host) -> bool {
        host.is_file(self)
    }
}
