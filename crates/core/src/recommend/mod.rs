use crate::emotion::Emotion;

/// Build the ordered query descriptors the poem store interprets.
///
/// Confidence is accepted for interface stability but does not currently
/// alter the queries; thresholding low-confidence labels into a broader
/// fallback query is the obvious extension point at this seam.
pub fn recommendation_queries(emotion: Emotion, _confidence: f32) -> Vec<String> {
    vec![
        format!("Poems with {emotion} emotion"),
        "Similar emotional tone".to_owned(),
        "Complementary themes".to_owned(),
    ]
}
