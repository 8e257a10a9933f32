//! Per-trial condition draw and sample presentation order

use rand::seq::SliceRandom;
use rand::Rng;
use ranklab_common::config::ConditionRanges;
use serde::Serialize;

/// Fixed emotion set the condition draw selects from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Emotion {
    Neutral,
    Angry,
    Happy,
    Sad,
    Surprised,
}

impl Emotion {
    /// Map an emotion id onto the fixed set. `Settings::validate` caps the
    /// draw range at 4, so every drawn id has a distinct label; anything
    /// larger falls through to the last variant rather than panicking.
    pub fn from_id(id: u8) -> Emotion {
        match id {
            0 => Emotion::Neutral,
            1 => Emotion::Angry,
            2 => Emotion::Happy,
            3 => Emotion::Sad,
            _ => Emotion::Surprised,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Emotion::Neutral => "Neutral",
            Emotion::Angry => "Angry",
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Surprised => "Surprised",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Condition parameters drawn fresh for every trial
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Condition {
    pub speaker_id: u32,
    pub text_id: u32,
    pub emotion_id: u8,
}

impl Condition {
    /// Draw three independent random integers from their inclusive ranges
    pub fn draw<R: Rng>(rng: &mut R, ranges: &ConditionRanges) -> Self {
        Self {
            speaker_id: rng.gen_range(ranges.speaker.0..=ranges.speaker.1),
            text_id: rng.gen_range(ranges.text.0..=ranges.text.1),
            emotion_id: rng.gen_range(ranges.emotion.0..=ranges.emotion.1),
        }
    }

    pub fn emotion(&self) -> Emotion {
        Emotion::from_id(self.emotion_id)
    }
}

/// One trial's condition plus the randomized presentation order of the
/// fixed sample identifier set
#[derive(Debug, Clone)]
pub struct TrialPlan {
    pub condition: Condition,
    /// Permutation of `0..samples`; position i in the UI plays `order[i]`
    pub order: Vec<u32>,
}

impl TrialPlan {
    /// Draw a fresh condition and a uniform permutation of the sample set
    /// (Fisher-Yates via `SliceRandom::shuffle`)
    pub fn draw<R: Rng>(rng: &mut R, ranges: &ConditionRanges, samples: usize) -> Self {
        let condition = Condition::draw(rng, ranges);
        let mut order: Vec<u32> = (0..samples as u32).collect();
        order.shuffle(rng);
        Self { condition, order }
    }

    /// Resource key for the player at `position`:
    /// `{speakerId}_{textId}_{emotionId}_{sampleId}`
    pub fn resource_key(&self, position: usize) -> String {
        format!(
            "{}_{}_{}_{}",
            self.condition.speaker_id,
            self.condition.text_id,
            self.condition.emotion_id,
            self.order[position]
        )
    }

    /// Resource keys for all player positions, in presentation order
    pub fn resource_keys(&self) -> Vec<String> {
        (0..self.order.len()).map(|i| self.resource_key(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ranklab_common::config::ConditionRanges;

    #[test]
    fn emotion_names_match_fixed_enumeration() {
        assert_eq!(Emotion::from_id(0).name(), "Neutral");
        assert_eq!(Emotion::from_id(1).name(), "Angry");
        assert_eq!(Emotion::from_id(2).name(), "Happy");
        assert_eq!(Emotion::from_id(3).name(), "Sad");
        assert_eq!(Emotion::from_id(4).name(), "Surprised");
    }

    #[test]
    fn condition_draw_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let ranges = ConditionRanges::default();
        for _ in 0..100 {
            let c = Condition::draw(&mut rng, &ranges);
            assert!((1..=10).contains(&c.speaker_id));
            assert!((20..=50).contains(&c.text_id));
            assert!((0..=4).contains(&c.emotion_id));
        }
    }

    #[test]
    fn order_is_a_permutation_of_the_sample_set() {
        let mut rng = StdRng::seed_from_u64(42);
        let ranges = ConditionRanges::default();
        for _ in 0..50 {
            let plan = TrialPlan::draw(&mut rng, &ranges, 5);
            let mut sorted = plan.order.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
        }
    }

    #[test]
    fn resource_key_has_documented_shape() {
        let plan = TrialPlan {
            condition: Condition {
                speaker_id: 7,
                text_id: 33,
                emotion_id: 2,
            },
            order: vec![4, 0, 1, 3, 2],
        };
        assert_eq!(plan.resource_key(0), "7_33_2_4");
        assert_eq!(plan.resource_key(4), "7_33_2_2");
        assert_eq!(plan.resource_keys().len(), 5);
    }

    #[test]
    fn degenerate_single_value_ranges_work() {
        let mut rng = StdRng::seed_from_u64(1);
        let ranges = ConditionRanges {
            speaker: (3, 3),
            text: (20, 20),
            emotion: (1, 1),
        };
        let c = Condition::draw(&mut rng, &ranges);
        assert_eq!((c.speaker_id, c.text_id, c.emotion_id), (3, 20, 1));
        assert_eq!(c.emotion(), Emotion::Angry);
    }
}
