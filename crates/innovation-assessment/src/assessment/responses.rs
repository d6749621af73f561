use super::domain::{AnswerKey, InvalidRatingError, Pillar, Rating, RatingScale, RatingTag};
use std::collections::BTreeMap;

/// Ratings keyed by (pillar, question index, tag). Writing an existing key
/// overwrites the previous rating.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseStore {
    scale: RatingScale,
    ratings: BTreeMap<AnswerKey, Rating>,
}

impl ResponseStore {
    pub fn new(scale: RatingScale) -> Self {
        Self {
            scale,
            ratings: BTreeMap::new(),
        }
    }

    pub fn scale(&self) -> &RatingScale {
        &self.scale
    }

    pub fn set_rating(
        &mut self,
        pillar: Pillar,
        question: usize,
        tag: RatingTag,
        value: impl Into<i64>,
    ) -> Result<Rating, InvalidRatingError> {
        let rating = self.scale.rating(value)?;
        self.ratings
            .insert(AnswerKey::new(pillar, question, tag), rating);
        Ok(rating)
    }

    pub fn rating(&self, pillar: Pillar, question: usize, tag: RatingTag) -> Option<Rating> {
        self.ratings
            .get(&AnswerKey::new(pillar, question, tag))
            .copied()
    }

    pub fn count_answered(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn clear(&mut self) {
        self.ratings.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AnswerKey, &Rating)> {
        self.ratings.iter()
    }

    /// Stored ratings for one pillar and tag, ordered by question index.
    pub fn ratings_for(
        &self,
        pillar: Pillar,
        tag: RatingTag,
    ) -> impl Iterator<Item = (usize, Rating)> + '_ {
        self.ratings
            .iter()
            .filter(move |(key, _)| key.pillar == pillar && key.tag == tag)
            .map(|(key, rating)| (key.question, *rating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_writes_overwrite_earlier_ones() {
        let mut store = ResponseStore::new(RatingScale::four_point());
        store
            .set_rating(Pillar::Strategy, 0, RatingTag::Current, 5)
            .expect("valid rating");
        store
            .set_rating(Pillar::Strategy, 0, RatingTag::Current, 9)
            .expect("valid rating");

        assert_eq!(store.count_answered(), 1);
        assert_eq!(
            store
                .rating(Pillar::Strategy, 0, RatingTag::Current)
                .map(Rating::value),
            Some(9)
        );
    }

    #[test]
    fn tags_are_stored_independently() {
        let mut store = ResponseStore::new(RatingScale::four_point());
        store
            .set_rating(Pillar::Capacity, 2, RatingTag::Current, 2)
            .expect("valid rating");
        store
            .set_rating(Pillar::Capacity, 2, RatingTag::Desired, 9)
            .expect("valid rating");

        assert_eq!(store.count_answered(), 2);
        assert!(store.rating(Pillar::Capacity, 3, RatingTag::Current).is_none());
    }

    #[test]
    fn off_scale_values_are_not_stored() {
        let mut store = ResponseStore::new(RatingScale::six_point());
        let error = store
            .set_rating(Pillar::Discipline, 0, RatingTag::Current, 7)
            .expect_err("7 is not on the six point scale");

        assert_eq!(error.value, 7);
        assert!(store.is_empty());
    }

    #[test]
    fn ratings_for_filters_by_pillar_and_tag() {
        let mut store = ResponseStore::new(RatingScale::four_point());
        store
            .set_rating(Pillar::Performance, 3, RatingTag::Current, 7)
            .expect("valid rating");
        store
            .set_rating(Pillar::Performance, 1, RatingTag::Current, 2)
            .expect("valid rating");
        store
            .set_rating(Pillar::Performance, 1, RatingTag::Desired, 9)
            .expect("valid rating");
        store
            .set_rating(Pillar::Strategy, 0, RatingTag::Current, 5)
            .expect("valid rating");

        let collected: Vec<(usize, u8)> = store
            .ratings_for(Pillar::Performance, RatingTag::Current)
            .map(|(question, rating)| (question, rating.value()))
            .collect();
        assert_eq!(collected, vec![(1, 2), (3, 7)]);

        store.clear();
        assert_eq!(store.count_answered(), 0);
    }
}
