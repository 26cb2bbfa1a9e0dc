use std::sync::Arc;

use async_trait::async_trait;

use crate::side_effect::{SideEffect, SideEffectInput};
use crate::types::{ActionCandidate, DigestQuery};

/// Writes an audit line for every completed digest so operators can
/// trace what was recommended and when.
pub struct DigestLogSideEffect;

#[async_trait]
impl SideEffect<DigestQuery, ActionCandidate> for DigestLogSideEffect {
    async fn run(
        &self,
        input: Arc<SideEffectInput<DigestQuery, ActionCandidate>>,
    ) -> Result<(), String> {
        log::info!(
            "request_id={} digest selected {} action candidates",
            input.query.request_id,
            input.selected_candidates.len()
        );
        Ok(())
    }
}
