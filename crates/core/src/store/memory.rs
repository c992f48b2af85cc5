use crate::store::{Poem, PoemStore, StoreError};
use futures::future::BoxFuture;
use futures::FutureExt;

/// Reference store over a fixed collection: a poem matches when any query
/// mentions its emotion label. Insertion order is preserved.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPoemStore {
    poems: Vec<Poem>,
}

impl InMemoryPoemStore {
    pub fn new(poems: Vec<Poem>) -> Self {
        Self { poems }
    }
}

impl PoemStore for InMemoryPoemStore {
    fn search(&self, queries: Vec<String>) -> BoxFuture<'_, Result<Vec<Poem>, StoreError>> {
        let poems = self.poems.clone();
        async move {
            let lowered: Vec<String> = queries.iter().map(|q| q.to_lowercase()).collect();
            let hits = poems
                .into_iter()
                .filter(|p| lowered.iter().any(|q| q.contains(p.emotion.as_str())))
                .collect();
            Ok(hits)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::Emotion;
    use crate::recommend::recommendation_queries;

    fn poem(title: &str, emotion: Emotion) -> Poem {
        Poem {
            title: title.to_owned(),
            author: "anon".to_owned(),
            emotion,
            text: String::new(),
        }
    }

    #[tokio::test]
    async fn matches_poems_by_the_emotion_query() {
        let store = InMemoryPoemStore::new(vec![
            poem("Rain at Dusk", Emotion::Sad),
            poem("First Light", Emotion::Happy),
            poem("Old Letters", Emotion::Nostalgic),
        ]);
        let hits = store
            .search(recommendation_queries(Emotion::Nostalgic, 0.75))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Old Letters");
    }

    #[tokio::test]
    async fn no_emotion_match_returns_empty() {
        let store = InMemoryPoemStore::new(vec![poem("First Light", Emotion::Happy)]);
        let hits = store
            .search(recommendation_queries(Emotion::Angry, 0.75))
            .await
            .unwrap();
        assert!(hits.is_empty());
    }
}
