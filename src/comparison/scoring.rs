use crate::types::MarkedWord;

/// Percentage of reference words marked correct. An empty reference scores 0.
pub fn score(marked_reference_words: &[MarkedWord]) -> u8 {
    let correct = marked_reference_words
        .iter()
        .filter(|word| word.is_correct)
        .count();
    accuracy_percent(correct, marked_reference_words.len())
}

/// `round(correct / total * 100)` evaluated in f64 with halves rounded up, or
/// 0 when `total` is 0.
pub fn accuracy_percent(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = correct.min(total) as f64 / total as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(flags: &[bool]) -> Vec<MarkedWord> {
        flags
            .iter()
            .enumerate()
            .map(|(idx, &ok)| MarkedWord::new(format!("w{idx}"), ok))
            .collect()
    }

    #[test]
    fn empty_reference_scores_zero() {
        assert_eq!(score(&[]), 0);
        assert_eq!(accuracy_percent(0, 0), 0);
    }

    #[test]
    fn whole_and_partial_scores() {
        assert_eq!(score(&marked(&[true, true, true, true])), 100);
        assert_eq!(score(&marked(&[false, false])), 0);
        assert_eq!(score(&marked(&[true, true, true, false, false])), 60);
        assert_eq!(score(&marked(&[true, false, false])), 33);
        assert_eq!(score(&marked(&[true, true, false])), 67);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(accuracy_percent(1, 8), 13);
        assert_eq!(accuracy_percent(3, 8), 38);
        assert_eq!(accuracy_percent(1, 200), 1);
    }

    #[test]
    fn rounding_follows_floating_point_product() {
        // 29 / 200 * 100 evaluates to 14.499999999999998 in f64.
        assert_eq!(accuracy_percent(29, 200), 14);
    }

    #[test]
    fn result_never_exceeds_one_hundred() {
        assert_eq!(accuracy_percent(7, 3), 100);
        for total in 1..=60 {
            for correct in 0..=total {
                assert!(accuracy_percent(correct, total) <= 100);
            }
        }
    }
}
