//! 选项洗牌
//!
//! `SliceRandom::shuffle` 即 Fisher-Yates，每种排列等概率。

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::{OptionId, Question};

/// 返回题目全部选项的一个随机排列
pub fn shuffled_options<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Vec<OptionId> {
    let mut ids = question.option_ids();
    ids.shuffle(rng);
    ids
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn question() -> Question {
        Question::new(
            "2 + 2?",
            "4",
            vec!["3".to_string(), "5".to_string(), "22".to_string()],
        )
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let q = question();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let order = shuffled_options(&q, &mut rng);
            assert_eq!(order.len(), 4);
            let unique: HashSet<_> = order.iter().collect();
            assert_eq!(unique.len(), 4);
            assert!(order.contains(&OptionId::Correct));
        }
    }

    #[test]
    fn test_correct_answer_lands_in_every_slot() {
        let q = question();
        let mut rng = StdRng::seed_from_u64(42);
        let mut slots: HashMap<usize, usize> = HashMap::new();
        let rounds = 4000;

        for _ in 0..rounds {
            let order = shuffled_options(&q, &mut rng);
            let slot = order.iter().position(|id| *id == OptionId::Correct).unwrap();
            *slots.entry(slot).or_default() += 1;
        }

        // 期望每格约 1000 次，放宽到 ±20%
        for slot in 0..4 {
            let hits = slots.get(&slot).copied().unwrap_or(0);
            assert!((800..=1200).contains(&hits), "slot {slot} hit {hits} times");
        }
    }
}
