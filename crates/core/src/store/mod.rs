mod memory;

pub use memory::InMemoryPoemStore;

use crate::emotion::Emotion;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// A poem as the downstream store exposes it. Ranking and persistence are
/// the store's business, not the engine's.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Poem {
    pub title: String,
    pub author: String,
    pub emotion: Emotion,
    pub text: String,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("poem store unavailable: {0}")]
    Unavailable(String),
}

/// Downstream collaborator consuming recommendation query descriptors.
pub trait PoemStore: Send + Sync {
    fn search(&self, queries: Vec<String>) -> BoxFuture<'_, Result<Vec<Poem>, StoreError>>;
}
