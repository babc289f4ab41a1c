//! 相关性过滤
//!
//! 类别问题得到否定回答后，屏蔽带有该类别标签的问题。

use std::collections::BTreeSet;

use crate::models::answer::AnswerSet;
use crate::models::question::Question;
use crate::models::taxonomy::{RelevanceRule, suppressed_categories};

pub struct RelevanceFilter<'a> {
    suppressed: BTreeSet<&'a str>,
}

impl<'a> RelevanceFilter<'a> {
    pub fn new(rules: &'a [RelevanceRule], answers: &AnswerSet) -> Self {
        Self {
            suppressed: suppressed_categories(rules, answers),
        }
    }

    /// 问题的任一标签被屏蔽即视为不相关；无标签的问题始终相关
    pub fn is_relevant(&self, question: &Question) -> bool {
        !question
            .categories
            .iter()
            .any(|category| self.suppressed.contains(category.as_str()))
    }
}
