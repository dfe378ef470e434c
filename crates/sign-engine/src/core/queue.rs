use std::collections::VecDeque;

use crate::api::types::Question;
use crate::assets::words::WordSource;
use crate::core::rng::Rng;

/// Shuffled cross-category question sequence for Endless mode.
/// Refills itself with a fresh draw whenever it runs dry.
#[derive(Debug, Clone)]
pub struct EndlessQueue {
    items: VecDeque<Question>,
    per_category: usize,
    refills: u32,
}

impl EndlessQueue {
    pub fn new(per_category: usize) -> Self {
        Self {
            items: VecDeque::new(),
            per_category,
            refills: 0,
        }
    }

    /// Shuffle the categories, take up to `per_category` shuffled words from each,
    /// then shuffle the combined list once more.
    pub fn build(source: &dyn WordSource, per_category: usize, rng: &mut Rng) -> Vec<Question> {
        let mut categories = source.categories();
        rng.shuffle(&mut categories);

        let mut picked = Vec::with_capacity(categories.len() * per_category);
        for category in categories {
            let mut words = source.words_for(&category);
            rng.shuffle(&mut words);
            picked.extend(
                words
                    .into_iter()
                    .take(per_category)
                    .map(|word| Question::new(word, category.clone())),
            );
        }

        rng.shuffle(&mut picked);
        picked
    }

    /// Replace the contents with a fresh draw.
    pub fn refill(&mut self, source: &dyn WordSource, rng: &mut Rng) {
        self.items = Self::build(source, self.per_category, rng).into();
        self.refills += 1;
        log::debug!("endless queue refilled with {} questions", self.items.len());
    }

    /// Dequeue the next question, refilling first when empty.
    /// `None` only when the source has no words at all.
    pub fn next(&mut self, source: &dyn WordSource, rng: &mut Rng) -> Option<Question> {
        if self.items.is_empty() {
            self.refill(source, rng);
        }
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of draws so far, the initial fill included.
    pub fn refills(&self) -> u32 {
        self.refills
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::words::WordBank;

    fn bank() -> WordBank {
        WordBank::from_json(
            r#"{ "categories": {
                "alphabet": ["A", "B", "C", "D", "E"],
                "greetings": ["Hello", "Thank You"],
                "numbers": ["One", "Two", "Three", "Four"],
                "empty": []
            } }"#,
        )
        .unwrap()
    }

    #[test]
    fn takes_at_most_three_per_category() {
        let mut rng = Rng::new(11);
        let questions = EndlessQueue::build(&bank(), 3, &mut rng);
        assert_eq!(questions.len(), 3 + 2 + 3);
        for category in ["alphabet", "greetings", "numbers"] {
            let count = questions.iter().filter(|q| q.category == category).count();
            assert!(count <= 3, "{} had {}", category, count);
        }
        assert!(questions.iter().all(|q| q.category != "empty"));
    }

    #[test]
    fn words_are_tagged_with_their_category() {
        let bank = bank();
        let mut rng = Rng::new(5);
        for q in EndlessQueue::build(&bank, 3, &mut rng) {
            assert!(bank.words_for(&q.category).contains(&q.word));
        }
    }

    #[test]
    fn no_duplicates_within_one_fill() {
        let mut rng = Rng::new(99);
        let questions = EndlessQueue::build(&bank(), 3, &mut rng);
        let mut seen = std::collections::HashSet::new();
        for q in &questions {
            assert!(seen.insert(q.clone()), "duplicate {:?}", q);
        }
    }

    #[test]
    fn refills_when_exhausted() {
        let bank = WordBank::from_json(
            r#"{ "categories": { "alphabet": ["A", "B", "C"], "numbers": ["One", "Two", "Three"] } }"#,
        )
        .unwrap();
        let mut rng = Rng::new(1);
        let mut queue = EndlessQueue::new(3);

        for _ in 0..6 {
            assert!(queue.next(&bank, &mut rng).is_some());
        }
        assert!(queue.is_empty());
        assert_eq!(queue.refills(), 1);

        assert!(queue.next(&bank, &mut rng).is_some());
        assert_eq!(queue.refills(), 2);
        assert_eq!(queue.len(), 5);
    }

    #[test]
    fn empty_source_yields_nothing() {
        let mut rng = Rng::new(1);
        let mut queue = EndlessQueue::new(3);
        assert!(queue.next(&WordBank::empty(), &mut rng).is_none());
    }
}
