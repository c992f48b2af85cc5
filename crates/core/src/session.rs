use crate::analysis::VoiceAnalysis;
use crate::config::DEFAULT_HISTORY_CAPACITY;
use crate::profile::{build_profile, VoiceProfile};
use std::collections::VecDeque;

/// Caller-owned history of analyses for one user.
///
/// The history is an ordered window: once full, recording a new analysis
/// evicts the oldest. The profile is rebuilt fresh from the retained
/// history on every call — there is no incremental aggregation state.
#[derive(Clone, Debug)]
pub struct Session {
    history: VecDeque<VoiceAnalysis>,
    capacity: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            history: VecDeque::new(),
            capacity,
        }
    }

    /// Append an analysis, returning the evicted oldest entry if the
    /// window was full.
    pub fn record(&mut self, analysis: VoiceAnalysis) -> Option<VoiceAnalysis> {
        let evicted = if self.history.len() == self.capacity {
            self.history.pop_front()
        } else {
            None
        };
        self.history.push_back(analysis);
        evicted
    }

    pub fn profile(&self) -> VoiceProfile {
        build_profile(self.history.iter())
    }

    pub fn analyses(&self) -> impl Iterator<Item = &VoiceAnalysis> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
