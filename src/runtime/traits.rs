//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::transcript::{InMemoryTranscript, Turn};
use async_trait::async_trait;
use std::sync::Arc;

/// Storage for session turns
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Append a turn, returning its position in the transcript
    async fn append(&self, turn: Turn) -> Result<usize, String>;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: TranscriptStore + ?Sized> TranscriptStore for Arc<T> {
    async fn append(&self, turn: Turn) -> Result<usize, String> {
        (**self).append(turn).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

#[async_trait]
impl TranscriptStore for InMemoryTranscript {
    async fn append(&self, turn: Turn) -> Result<usize, String> {
        Ok(self.push(turn).await)
    }
}
