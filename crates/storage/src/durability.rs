//! Durability mode for topic appends.
//!
//! Defines when appended records are forced to stable storage.

/// Durability mode for topic appends.
///
/// Controls whether an append returns before or after its bytes reach the
/// disk, trading append latency for crash safety.
///
/// # Mode Comparison
///
/// | Mode | fsync | Use Case |
/// |------|-------|----------|
/// | Buffered | never (OS decides) | Default, high-throughput topics |
/// | Strict | after every append call | Audit trails, low-volume topics |
///
/// Neither mode makes an append atomic: the payload and its trailer are
/// written separately, and a crash between them leaves a dangling tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// Leave flushing to the operating system's page cache.
    ///
    /// Recently appended records may be lost on power failure.
    #[default]
    Buffered,

    /// `sync_data` after every append call, once its last trailer is written.
    Strict,
}

impl DurabilityMode {
    /// Check if appends must be synced before returning.
    pub fn requires_sync(&self) -> bool {
        matches!(self, DurabilityMode::Strict)
    }

    /// Human-readable description of the mode.
    pub fn description(&self) -> &'static str {
        match self {
            DurabilityMode::Buffered => "Buffered (OS flushes, fastest)",
            DurabilityMode::Strict => "Strict (fsync every append, safest)",
        }
    }
}
