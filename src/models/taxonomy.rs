//! 问题分类规则
//!
//! 每个问题可带若干类别标签；规则表描述"某个类别问题得到某个回答后，
//! 哪个标签下的问题不再相关"。规则是数据，新类别只需增加标签和规则。

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::answer::{Answer, AnswerSet};

/// 相关性规则
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceRule {
    /// 决定类别的问题
    pub question: String,

    /// 触发规则的回答
    pub answer: Answer,

    /// 被屏蔽的类别标签
    pub suppresses: String,
}

impl RelevanceRule {
    pub fn new(question: &str, answer: Answer, suppresses: &str) -> Self {
        Self {
            question: question.to_string(),
            answer,
            suppresses: suppresses.to_string(),
        }
    }

    pub fn is_triggered(&self, answers: &AnswerSet) -> bool {
        answers.get(&self.question) == Some(&self.answer)
    }
}

/// 根据回答集计算被屏蔽的类别
pub fn suppressed_categories<'a>(
    rules: &'a [RelevanceRule],
    answers: &AnswerSet,
) -> BTreeSet<&'a str> {
    rules
        .iter()
        .filter(|rule| rule.is_triggered(answers))
        .map(|rule| rule.suppresses.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_triggers_only_on_matching_answer() {
        let rules = vec![
            RelevanceRule::new("Is it an animal?", Answer::No, "animal"),
            RelevanceRule::new("Is it a person?", Answer::No, "person"),
        ];

        let mut answers = AnswerSet::new();
        answers.insert("Is it an animal?".to_string(), Answer::Yes);
        assert!(suppressed_categories(&rules, &answers).is_empty());

        answers.insert("Is it an animal?".to_string(), Answer::No);
        answers.insert("Is it a person?".to_string(), Answer::No);
        let suppressed = suppressed_categories(&rules, &answers);
        assert!(suppressed.contains("animal"));
        assert!(suppressed.contains("person"));
    }
}
