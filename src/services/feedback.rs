//! 反馈调整
//!
//! 猜对：写入实体记录，并提高本局用到的问题权重；
//! 猜错：降低这些问题的权重，实体目录不变。
//! 之后统一执行权重归一化。

use serde::{Deserialize, Serialize};

use crate::config::config::EngineConfig;
use crate::models::answer::AnswerSet;
use crate::models::entity::EntityCatalog;
use crate::models::question::QuestionBank;

/// 权重调整策略
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPolicy {
    pub reward_factor: f64,
    pub penalty_factor: f64,
    pub renormalize_threshold: f64,
    pub renormalize_target: f64,
}

impl Default for FeedbackPolicy {
    fn default() -> Self {
        Self {
            reward_factor: 1.05,
            penalty_factor: 0.95,
            renormalize_threshold: 10.0,
            renormalize_target: 5.0,
        }
    }
}

impl From<&EngineConfig> for FeedbackPolicy {
    fn from(config: &EngineConfig) -> Self {
        Self {
            reward_factor: config.reward_factor,
            penalty_factor: config.penalty_factor,
            renormalize_threshold: config.renormalize_threshold,
            renormalize_target: config.renormalize_target,
        }
    }
}

/// 一次反馈造成的变化
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackOutcome {
    /// 被调整权重的问题数
    pub adjusted_questions: usize,
    /// 是否新增了实体
    pub new_entity: bool,
    /// 是否触发了归一化
    pub renormalized: bool,
}

pub fn apply_feedback(
    bank: &mut QuestionBank,
    catalog: &mut EntityCatalog,
    entity: &str,
    answers: &AnswerSet,
    correct: bool,
    policy: &FeedbackPolicy,
) -> FeedbackOutcome {
    let mut outcome = FeedbackOutcome::default();

    let factor = if correct {
        outcome.new_entity = catalog.upsert(entity, answers.clone());
        policy.reward_factor
    } else {
        policy.penalty_factor
    };

    outcome.adjusted_questions = answers
        .keys()
        .filter(|question| bank.scale_weight(question, factor))
        .count();

    outcome.renormalized =
        bank.renormalize(policy.renormalize_threshold, policy.renormalize_target);
    outcome
}
