use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which review source a `Review` came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReviewSource {
    Primary,   // catalog-linked structured reviews, shares catalog ids
    Secondary, // title-keyed aggregate ratings
}

impl ReviewSource {
    /// Prefix used in `Review::id`
    pub fn tag(&self) -> &'static str {
        match self {
            ReviewSource::Primary => "primary",
            ReviewSource::Secondary => "secondary",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String, // "<source tag>-<source-local id>"
    pub author: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub source: ReviewSource,
    pub created_at: DateTime<Utc>,
}

/// Reviews from every source for one movie: primary reviews first, then secondary,
/// each in the order the source returned them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct AggregatedReviewSet {
    reviews: Vec<Review>,
}

impl AggregatedReviewSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, review: Review) {
        self.reviews.push(review);
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Review> {
        self.reviews.iter()
    }

    pub fn as_slice(&self) -> &[Review] {
        &self.reviews
    }

    pub fn by_source(&self, source: ReviewSource) -> impl Iterator<Item = &Review> {
        self.reviews.iter().filter(move |review| review.source == source)
    }

    /// Mean of all present ratings, or None when no review carries one
    pub fn average_rating(&self) -> Option<f64> {
        let ratings: Vec<f64> = self.reviews.iter().filter_map(|review| review.rating).collect();
        if ratings.is_empty() {
            return None;
        }
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    }
}

impl<'a> IntoIterator for &'a AggregatedReviewSet {
    type Item = &'a Review;
    type IntoIter = std::slice::Iter<'a, Review>;

    fn into_iter(self) -> Self::IntoIter {
        self.reviews.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: &str, source: ReviewSource, rating: Option<f64>) -> Review {
        Review {
            id: id.to_string(),
            author: "Anonymous".to_string(),
            content: String::new(),
            rating,
            source,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_by_source_and_average() {
        let mut set = AggregatedReviewSet::new();
        set.push(review("primary-a", ReviewSource::Primary, Some(8.0)));
        set.push(review("primary-b", ReviewSource::Primary, None));
        set.push(review("secondary-0", ReviewSource::Secondary, Some(6.0)));

        assert_eq!(set.len(), 3);
        assert_eq!(set.by_source(ReviewSource::Primary).count(), 2);
        assert_eq!(set.by_source(ReviewSource::Secondary).count(), 1);
        assert_eq!(set.average_rating(), Some(7.0));
    }

    #[test]
    fn test_empty_set_has_no_average() {
        let set = AggregatedReviewSet::new();
        assert!(set.is_empty());
        assert_eq!(set.average_rating(), None);
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let mut set = AggregatedReviewSet::new();
        set.push(review("primary-a", ReviewSource::Primary, None));
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["id"], "primary-a");
        assert!(json[0].get("rating").is_none());
    }
}
