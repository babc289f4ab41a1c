//! 回答数据模型
//!
//! 用户回答与实体记录都只取 0/1 两个值；实体侧额外区分"未记录"。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 二值回答
///
/// 序列化为整数 `1` / `0`，反序列化时拒绝其他取值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Answer {
    /// 是
    Yes,
    /// 否
    No,
}

impl Answer {
    /// 从布尔值构造
    pub fn from_bool(value: bool) -> Self {
        if value { Answer::Yes } else { Answer::No }
    }
}

impl TryFrom<u8> for Answer {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Answer::Yes),
            0 => Ok(Answer::No),
            other => Err(format!("answer must be 0 or 1, got {}", other)),
        }
    }
}

impl From<Answer> for u8 {
    fn from(answer: Answer) -> u8 {
        match answer {
            Answer::Yes => 1,
            Answer::No => 0,
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// 实体对某个问题的记录状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    Yes,
    No,
    /// 实体没有该问题的记录
    Unknown,
}

impl AnswerStatus {
    /// 与一个确定的回答比较；`Unknown` 返回 `None`
    pub fn agrees_with(self, answer: Answer) -> Option<bool> {
        match self {
            AnswerStatus::Yes => Some(answer == Answer::Yes),
            AnswerStatus::No => Some(answer == Answer::No),
            AnswerStatus::Unknown => None,
        }
    }
}

impl From<Option<Answer>> for AnswerStatus {
    fn from(answer: Option<Answer>) -> Self {
        match answer {
            Some(Answer::Yes) => AnswerStatus::Yes,
            Some(Answer::No) => AnswerStatus::No,
            None => AnswerStatus::Unknown,
        }
    }
}

/// 一局游戏中累计的回答集合（问题文本 → 回答）
pub type AnswerSet = BTreeMap<String, Answer>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Answer::Yes).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Answer::No).unwrap(), "0");
    }

    #[test]
    fn test_answer_rejects_out_of_range() {
        assert!(serde_json::from_str::<Answer>("2").is_err());
        assert!(serde_json::from_str::<Answer>("-1").is_err());
        assert_eq!(serde_json::from_str::<Answer>("1").unwrap(), Answer::Yes);
    }

    #[test]
    fn test_status_agreement() {
        assert_eq!(AnswerStatus::Yes.agrees_with(Answer::Yes), Some(true));
        assert_eq!(AnswerStatus::No.agrees_with(Answer::Yes), Some(false));
        assert_eq!(AnswerStatus::Unknown.agrees_with(Answer::No), None);
        assert_eq!(AnswerStatus::from(None), AnswerStatus::Unknown);
    }
}
