//! 下一个问题的选择策略
//!
//! 1. 空回答集：按根分类问题的固定顺序提问
//! 2. 无候选实体：直接取权重最高的未回答问题
//! 3. 否则在相关的未回答问题中取信息增益最高者
//! 4. 没有正得分时回退到权重最高的未回答问题（不做相关性过滤）

use crate::models::answer::AnswerSet;
use crate::models::entity::EntityCatalog;
use crate::models::question::{Question, QuestionBank, highest_weight};
use crate::models::taxonomy::RelevanceRule;
use crate::services::candidate_filter::filter_candidates;
use crate::services::ranker::best_question;
use crate::services::relevance::RelevanceFilter;

/// 选择依据，便于日志和调试
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionReason {
    /// 根分类问题
    Priming,
    /// 信息增益最高
    InformationGain,
    /// 候选集为空，取权重最高
    NoCandidates,
    /// 没有正得分，取权重最高
    WeightFallback,
}

/// 选择的问题及依据
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub question: &'a Question,
    pub reason: SelectionReason,
}

pub struct QuestionSelector<'a> {
    pub bank: &'a QuestionBank,
    pub catalog: &'a EntityCatalog,
    pub root_questions: &'a [String],
    pub rules: &'a [RelevanceRule],
}

impl<'a> QuestionSelector<'a> {
    pub fn select(&self, answers: &AnswerSet) -> Option<Selection<'a>> {
        if answers.is_empty() {
            if let Some(question) = self.priming_question(answers) {
                return Some(Selection {
                    question,
                    reason: SelectionReason::Priming,
                });
            }
        }

        let candidates = filter_candidates(self.catalog, answers);
        if candidates.is_empty() {
            return highest_weight(self.bank.unanswered(answers)).map(|question| Selection {
                question,
                reason: SelectionReason::NoCandidates,
            });
        }

        let relevance = RelevanceFilter::new(self.rules, answers);
        let relevant = self
            .bank
            .unanswered(answers)
            .filter(|q| relevance.is_relevant(q));

        if let Some(question) = best_question(relevant, &candidates) {
            return Some(Selection {
                question,
                reason: SelectionReason::InformationGain,
            });
        }

        highest_weight(self.bank.unanswered(answers)).map(|question| Selection {
            question,
            reason: SelectionReason::WeightFallback,
        })
    }

    /// 第一个尚未提问且存在于问题库中的根分类问题
    fn priming_question(&self, answers: &AnswerSet) -> Option<&'a Question> {
        self.root_questions
            .iter()
            .filter(|text| !answers.contains_key(text.as_str()))
            .find_map(|text| self.bank.get(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer::Answer;
    use crate::models::seed;

    struct Fixture {
        bank: QuestionBank,
        catalog: EntityCatalog,
        roots: Vec<String>,
        rules: Vec<RelevanceRule>,
    }

    impl Fixture {
        fn seed() -> Self {
            Self {
                bank: seed::question_bank(),
                catalog: seed::entity_catalog(),
                roots: seed::root_questions(),
                rules: seed::relevance_rules(),
            }
        }

        fn select(&self, answers: &AnswerSet) -> Option<(String, SelectionReason)> {
            QuestionSelector {
                bank: &self.bank,
                catalog: &self.catalog,
                root_questions: &self.roots,
                rules: &self.rules,
            }
            .select(answers)
            .map(|s| (s.question.text.clone(), s.reason))
        }
    }

    fn answers(pairs: &[(&str, Answer)]) -> AnswerSet {
        pairs.iter().map(|(q, a)| (q.to_string(), *a)).collect()
    }

    #[test]
    fn test_empty_answers_prime_with_root_question() {
        let fixture = Fixture::seed();
        assert_eq!(
            fixture.select(&AnswerSet::new()),
            Some((seed::IS_ANIMAL.to_string(), SelectionReason::Priming))
        );
    }

    #[test]
    fn test_priming_skips_roots_missing_from_bank() {
        let mut fixture = Fixture::seed();
        fixture.roots = vec!["Is it a vegetable?".into(), seed::IS_PLACE.into()];
        assert_eq!(
            fixture.select(&AnswerSet::new()).unwrap().0,
            seed::IS_PLACE
        );
    }

    #[test]
    fn test_information_gain_after_first_answer() {
        let fixture = Fixture::seed();
        let (question, reason) = fixture
            .select(&answers(&[(seed::IS_ANIMAL, Answer::Yes)]))
            .unwrap();

        // water、mammal、fly 在 5 个候选上都是 1/5，取最先出现者
        assert_eq!(reason, SelectionReason::InformationGain);
        assert_eq!(question, "Does it live in water?");
    }

    #[test]
    fn test_no_candidates_falls_back_to_weight() {
        let mut fixture = Fixture::seed();
        fixture.bank.scale_weight("Is it a place?", 3.0);

        let (question, reason) = fixture
            .select(&answers(&[(seed::IS_ANIMAL, Answer::No)]))
            .unwrap();
        assert_eq!(reason, SelectionReason::NoCandidates);
        assert_eq!(question, "Is it a place?");
    }

    #[test]
    fn test_zero_gain_falls_back_ignoring_relevance() {
        let mut fixture = Fixture::seed();
        fixture.catalog = EntityCatalog::from(vec![
            crate::models::entity::Entity::new("rock").with_answer(seed::IS_ANIMAL, Answer::No),
        ]);
        fixture.bank.scale_weight("Is it a mammal?", 2.0);

        let (question, reason) = fixture
            .select(&answers(&[(seed::IS_ANIMAL, Answer::No)]))
            .unwrap();
        assert_eq!(reason, SelectionReason::WeightFallback);
        assert_eq!(question, "Is it a mammal?");
    }

    #[test]
    fn test_not_an_animal_skips_tied_animal_question() {
        use crate::models::entity::Entity;

        let mut fixture = Fixture::seed();
        fixture.catalog = EntityCatalog::from(vec![
            Entity::new("rock")
                .with_answer(seed::IS_ANIMAL, Answer::No)
                .with_answer("Is it a mammal?", Answer::Yes),
            Entity::new("pebble")
                .with_answer(seed::IS_ANIMAL, Answer::No)
                .with_answer("Is it a mammal?", Answer::No)
                .with_answer("Can it fly?", Answer::Yes),
            Entity::new("stone")
                .with_answer(seed::IS_ANIMAL, Answer::No)
                .with_answer("Can it fly?", Answer::No),
        ]);

        // mammal 与 fly 得分相同且 mammal 在前，但 mammal 属于 animal 类别
        let (question, reason) = fixture
            .select(&answers(&[(seed::IS_ANIMAL, Answer::No)]))
            .unwrap();
        assert_eq!(reason, SelectionReason::InformationGain);
        assert_eq!(question, "Can it fly?");

        fixture.rules.clear();
        let (question, _) = fixture
            .select(&answers(&[(seed::IS_ANIMAL, Answer::No)]))
            .unwrap();
        assert_eq!(question, "Is it a mammal?");
    }

    #[test]
    fn test_not_a_person_skips_heavier_person_question() {
        use crate::models::entity::Entity;

        let mut fixture = Fixture::seed();
        fixture.bank.scale_weight("Is it a real person?", 2.0);
        fixture.catalog = EntityCatalog::from(vec![
            Entity::new("statue")
                .with_answer(seed::IS_PERSON, Answer::No)
                .with_answer("Is it a real person?", Answer::Yes)
                .with_answer("Can it fly?", Answer::Yes),
            Entity::new("painting")
                .with_answer(seed::IS_PERSON, Answer::No)
                .with_answer("Is it a real person?", Answer::No)
                .with_answer("Can it fly?", Answer::No),
        ]);

        let round = answers(&[(seed::IS_PERSON, Answer::No)]);
        let (question, reason) = fixture.select(&round).unwrap();
        assert_eq!(reason, SelectionReason::InformationGain);
        assert_eq!(question, "Can it fly?");

        fixture.rules.clear();
        assert_eq!(fixture.select(&round).unwrap().0, "Is it a real person?");
    }

    #[test]
    fn test_exhausted_bank_returns_none() {
        let fixture = Fixture::seed();
        let all: AnswerSet = fixture
            .bank
            .iter()
            .map(|q| (q.text.clone(), Answer::Yes))
            .collect();
        assert!(fixture.select(&all).is_none());
    }
}
