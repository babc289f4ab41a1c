//! 信息增益排序
//!
//! 这里的"信息增益"是一个均衡度启发式：问题把候选集切得越接近对半，
//! 得分越高，再乘以问题权重。不是香农熵。

use crate::models::answer::AnswerStatus;
use crate::models::entity::Entity;
use crate::models::question::Question;

/// 候选集在某个问题上的回答分布
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitTally {
    pub yes: usize,
    pub no: usize,
    pub unknown: usize,
}

impl SplitTally {
    pub fn tally(question: &str, candidates: &[&Entity]) -> Self {
        candidates
            .iter()
            .fold(Self::default(), |mut tally, entity| {
                match entity.status(question) {
                    AnswerStatus::Yes => tally.yes += 1,
                    AnswerStatus::No => tally.no += 1,
                    AnswerStatus::Unknown => tally.unknown += 1,
                }
                tally
            })
    }

    pub fn total(&self) -> usize {
        self.yes + self.no + self.unknown
    }

    /// `min(yes, no) / total`，取值 [0, 0.5]
    pub fn balance(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.yes.min(self.no) as f64 / total as f64,
        }
    }
}

/// 问题在候选集上的得分：`balance × weight`
pub fn information_gain(question: &Question, candidates: &[&Entity]) -> f64 {
    SplitTally::tally(&question.text, candidates).balance() * question.weight
}

/// 得分最高且为正的问题，打平时取最先出现者
pub fn best_question<'a, I>(questions: I, candidates: &[&Entity]) -> Option<&'a Question>
where
    I: IntoIterator<Item = &'a Question>,
{
    let mut best: Option<(&Question, f64)> = None;
    for question in questions {
        let score = information_gain(question, candidates);
        if score <= 0.0 {
            continue;
        }
        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((question, score)),
        }
    }
    best.map(|(question, _)| question)
}
