//! 预测
//!
//! 对每个实体计算匹配率：已回答且实体有记录的问题中，记录与回答一致的比例。
//! 只有匹配率和回答数都达到门槛时才给出最终猜测。

use serde::{Deserialize, Serialize};

use crate::models::answer::AnswerSet;
use crate::models::entity::{Entity, EntityCatalog};
use crate::models::question::QuestionBank;

/// 预测门槛
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionThresholds {
    /// 最少回答数（含）
    pub min_questions: usize,
    /// 匹配率下限（不含）
    pub min_confidence: f64,
}

impl Default for PredictionThresholds {
    fn default() -> Self {
        Self {
            min_questions: 8,
            min_confidence: 0.8,
        }
    }
}

/// 预测结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 最终猜测；置信不足时为空
    pub entity: Option<String>,
    /// 最佳实体的匹配率，[0, 1]
    pub confidence: f64,
}

impl Prediction {
    pub fn none() -> Self {
        Self {
            entity: None,
            confidence: 0.0,
        }
    }
}

/// 实体的匹配率；没有重叠问题时返回 `None`
///
/// 不在问题库中的问题不参与计算。
pub fn match_ratio(entity: &Entity, answers: &AnswerSet, bank: &QuestionBank) -> Option<f64> {
    let (agreeing, overlapping) = answers
        .iter()
        .filter(|(question, _)| bank.contains(question))
        .filter_map(|(question, answer)| entity.status(question).agrees_with(*answer))
        .fold((0usize, 0usize), |(agree, total), matched| {
            (agree + usize::from(matched), total + 1)
        });

    match overlapping {
        0 => None,
        total => Some(agreeing as f64 / total as f64),
    }
}

/// 匹配率最高的实体，打平时取目录中最先出现者
pub fn best_match<'a>(
    catalog: &'a EntityCatalog,
    answers: &AnswerSet,
    bank: &QuestionBank,
) -> Option<(&'a Entity, f64)> {
    catalog
        .iter()
        .filter_map(|entity| match_ratio(entity, answers, bank).map(|ratio| (entity, ratio)))
        .fold(None, |best, (entity, ratio)| match best {
            Some((_, best_ratio)) if best_ratio >= ratio => best,
            _ => Some((entity, ratio)),
        })
}

pub fn predict(
    catalog: &EntityCatalog,
    bank: &QuestionBank,
    answers: &AnswerSet,
    thresholds: PredictionThresholds,
) -> Prediction {
    if answers.is_empty() {
        return Prediction::none();
    }

    let Some((entity, confidence)) = best_match(catalog, answers, bank) else {
        return Prediction::none();
    };

    let committed =
        confidence > thresholds.min_confidence && answers.len() >= thresholds.min_questions;

    Prediction {
        entity: committed.then(|| entity.name.clone()),
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer::Answer;
    use crate::models::seed;

    fn answers(pairs: &[(&str, u8)]) -> AnswerSet {
        pairs
            .iter()
            .map(|(q, a)| (q.to_string(), Answer::try_from(*a).unwrap()))
            .collect()
    }

    fn dog_answers() -> AnswerSet {
        answers(&[
            ("Is it an animal?", 1),
            ("Does it live in water?", 0),
            ("Is it a mammal?", 1),
            ("Can it fly?", 0),
            ("Is it a pet?", 1),
            ("Is it a predator?", 0),
            ("Is it larger than a microwave?", 0),
            ("Is it common in households?", 1),
        ])
    }

    #[test]
    fn test_empty_answers() {
        let prediction = predict(
            &seed::entity_catalog(),
            &seed::question_bank(),
            &AnswerSet::new(),
            PredictionThresholds::default(),
        );
        assert_eq!(prediction, Prediction::none());
    }

    #[test]
    fn test_predicts_dog() {
        let prediction = predict(
            &seed::entity_catalog(),
            &seed::question_bank(),
            &dog_answers(),
            PredictionThresholds::default(),
        );
        assert_eq!(prediction.entity.as_deref(), Some("dog"));
        assert!(prediction.confidence > 0.8);
    }

    #[test]
    fn test_too_few_answers_withholds_guess() {
        let mut partial = dog_answers();
        partial.remove("Is it common in households?");

        let prediction = predict(
            &seed::entity_catalog(),
            &seed::question_bank(),
            &partial,
            PredictionThresholds::default(),
        );
        assert!(prediction.entity.is_none());
        assert_eq!(prediction.confidence, 1.0);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let prediction = predict(
            &seed::entity_catalog(),
            &seed::question_bank(),
            &answers(&[("Is it a place?", 1)]),
            PredictionThresholds::default(),
        );
        assert_eq!(prediction, Prediction::none());
    }

    #[test]
    fn test_unknown_questions_ignored() {
        let bank = seed::question_bank();
        let entity = Entity::new("ghost").with_answer("Is it spooky?", Answer::Yes);
        assert_eq!(match_ratio(&entity, &answers(&[("Is it spooky?", 1)]), &bank), None);
    }

    #[test]
    fn test_tie_prefers_first_in_catalog() {
        let catalog = seed::entity_catalog();
        let bank = seed::question_bank();
        // 所有动物都记录了 "Is it an animal?" = 1
        let (entity, ratio) = best_match(&catalog, &answers(&[("Is it an animal?", 1)]), &bank).unwrap();
        assert_eq!(entity.name, "dog");
        assert_eq!(ratio, 1.0);
    }

    #[test]
    fn test_confidence_must_exceed_threshold() {
        let thresholds = PredictionThresholds {
            min_questions: 1,
            min_confidence: 1.0,
        };
        let prediction = predict(
            &seed::entity_catalog(),
            &seed::question_bank(),
            &answers(&[("Is it an animal?", 1)]),
            thresholds,
        );
        assert!(prediction.entity.is_none());
        assert_eq!(prediction.confidence, 1.0);
    }
}
