//! Reply templates and the answer sets they belong to.

use rand::Rng;
use rand::seq::SliceRandom;

/// Placeholder replaced by the nick of whoever triggered the reply.
pub const SENDER_PLACEHOLDER: &str = "{sender}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    template: String,
    is_action: bool,
}

impl Answer {
    /// Plain message reply.
    pub fn reply(template: &str) -> Self {
        Self {
            template: template.to_owned(),
            is_action: false,
        }
    }

    /// Narrated `/me` reply.
    pub fn action(template: &str) -> Self {
        Self {
            template: template.to_owned(),
            is_action: true,
        }
    }

    pub fn is_action(&self) -> bool {
        self.is_action
    }

    pub fn build(&self, sender: &str) -> String {
        self.template.replace(SENDER_PLACEHOLDER, sender)
    }
}

/// Probability gate plus the pooled replies shared by one or more patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    probability: u8,
    answers: Vec<Answer>,
}

impl AnswerSet {
    /// `probability` is a percentage, clamped to `0..=100`.
    pub fn new(probability: i64, replies: &[String], actions: &[String]) -> Self {
        let answers = replies
            .iter()
            .map(|r| Answer::reply(r))
            .chain(actions.iter().map(|a| Answer::action(a)))
            .collect();
        Self {
            probability: probability.clamp(0, 100) as u8,
            answers,
        }
    }

    pub fn probability(&self) -> u8 {
        self.probability
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Draws the gate and, when it passes, one answer. `None` when the gate
    /// fails or there is nothing to say.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Answer> {
        let roll: u8 = rng.gen_range(0..100);
        if roll >= self.probability {
            return None;
        }
        self.answers.choose(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sender_placeholder_is_substituted() {
        let answer = Answer::action("pokes {sender} harder!");
        assert!(answer.is_action());
        assert_eq!(answer.build("alice"), "pokes alice harder!");
        assert_eq!(Answer::reply("Hey!").build("alice"), "Hey!");
    }

    #[test]
    fn probability_is_clamped() {
        assert_eq!(AnswerSet::new(250, &[], &[]).probability(), 100);
        assert_eq!(AnswerSet::new(-3, &[], &[]).probability(), 0);
        assert_eq!(AnswerSet::new(42, &[], &[]).probability(), 42);
    }

    #[test]
    fn replies_and_actions_are_pooled() {
        let set = AnswerSet::new(100, &strings(&["Hey!"]), &strings(&["giggles", "waves"]));
        assert_eq!(
            set.answers(),
            &[
                Answer::reply("Hey!"),
                Answer::action("giggles"),
                Answer::action("waves")
            ]
        );
    }

    #[test]
    fn always_fires_at_100() {
        let set = AnswerSet::new(100, &strings(&["Hey!"]), &[]);
        let mut rng = StdRng::seed_from_u64(7);
        let fired = (0..1000).filter(|_| set.pick(&mut rng).is_some()).count();
        assert_eq!(fired, 1000);
    }

    #[test]
    fn never_fires_at_0() {
        let set = AnswerSet::new(0, &strings(&["Hey!"]), &strings(&["giggles"]));
        let mut rng = StdRng::seed_from_u64(7);
        let fired = (0..1000).filter(|_| set.pick(&mut rng).is_some()).count();
        assert_eq!(fired, 0);
    }

    #[test]
    fn empty_pool_never_answers() {
        let set = AnswerSet::new(100, &[], &[]);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(set.pick(&mut rng).is_none());
    }

    #[test]
    fn half_probability_fires_roughly_half_the_time() {
        let set = AnswerSet::new(50, &strings(&["Hey!"]), &[]);
        let mut rng = StdRng::seed_from_u64(1234);
        let fired = (0..10_000).filter(|_| set.pick(&mut rng).is_some()).count();
        assert!((4_500..5_500).contains(&fired), "fired {fired} times");
    }
}
