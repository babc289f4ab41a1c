//! 问题库数据模型
//!
//! 问题以文本作为唯一键，按插入顺序保存。插入顺序即规范顺序，
//! 排序打平时取最先出现的问题。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::answer::AnswerSet;

/// 新问题的初始权重
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// 问题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// 问题文本（同时作为标识）
    pub text: String,

    /// 历史有效性权重，非负
    pub weight: f64,

    /// 所属类别标签，供相关性过滤使用
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl Question {
    /// 创建权重为 1.0 的新问题
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            weight: DEFAULT_WEIGHT,
            categories: Vec::new(),
        }
    }

    /// 附加类别标签
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for category in categories {
            let category = category.into();
            if !self.categories.contains(&category) {
                self.categories.push(category);
            }
        }
        self
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// 问题库
///
/// 持久化形式为有序的问题数组，权重和标签随问题一起保存。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Question>", into = "Vec<Question>")]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl From<Vec<Question>> for QuestionBank {
    /// 重复文本只保留第一次出现；负权重截断为 0
    fn from(questions: Vec<Question>) -> Self {
        let mut seen = HashSet::new();
        let questions = questions
            .into_iter()
            .filter(|q| seen.insert(q.text.clone()))
            .map(|mut q| {
                q.weight = q.weight.max(0.0);
                q
            })
            .collect();
        Self { questions }
    }
}

impl From<QuestionBank> for Vec<Question> {
    fn from(bank: QuestionBank) -> Self {
        bank.questions
    }
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 按规范顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn get(&self, text: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.text == text)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.get(text).is_some()
    }

    pub fn weight(&self, text: &str) -> Option<f64> {
        self.get(text).map(|q| q.weight)
    }

    /// 追加问题，已存在时不做任何修改
    ///
    /// 返回是否真正插入。
    pub fn add(&mut self, question: Question) -> bool {
        if self.contains(&question.text) {
            return false;
        }
        self.questions.push(question);
        true
    }

    /// 按倍数调整权重，未知问题忽略
    pub fn scale_weight(&mut self, text: &str, factor: f64) -> bool {
        match self.questions.iter_mut().find(|q| q.text == text) {
            Some(question) => {
                question.weight = (question.weight * factor).max(0.0);
                true
            }
            None => false,
        }
    }

    pub fn max_weight(&self) -> Option<f64> {
        self.questions.iter().map(|q| q.weight).reduce(f64::max)
    }

    /// 最大权重超过 `threshold` 时按比例缩放，使新的最大值恰好为 `target`
    ///
    /// 返回是否发生了缩放。
    pub fn renormalize(&mut self, threshold: f64, target: f64) -> bool {
        let Some(max) = self.max_weight() else {
            return false;
        };
        if max <= threshold {
            return false;
        }

        for question in &mut self.questions {
            question.weight = if question.weight == max {
                target
            } else {
                question.weight / max * target
            };
        }
        true
    }

    /// 尚未回答的问题（规范顺序）
    pub fn unanswered<'a, 'b>(
        &'a self,
        answers: &'b AnswerSet,
    ) -> impl Iterator<Item = &'a Question> + 'b
    where
        'a: 'b,
    {
        self.questions
            .iter()
            .filter(move |q| !answers.contains_key(&q.text))
    }
}

/// 取权重最高的问题，打平时取最先出现者
pub fn highest_weight<'a, I>(questions: I) -> Option<&'a Question>
where
    I: IntoIterator<Item = &'a Question>,
{
    questions.into_iter().fold(None, |best, q| match best {
        Some(b) if b.weight >= q.weight => Some(b),
        _ => Some(q),
    })
}
