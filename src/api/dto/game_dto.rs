//! 游戏 DTO
//!
//! 预测、反馈和加题接口的请求与响应。`answers` 中的取值只能是 0 或 1，
//! 其他值在反序列化阶段就会被拒绝。

use serde::{Deserialize, Serialize};

use crate::models::answer::AnswerSet;
use crate::services::feedback::FeedbackOutcome;

/// 无法继续时返回给前端的提示
pub const GIVE_UP_MESSAGE: &str = "I don't know what you're thinking of!";

/// 预测请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictRequest {
    /// 本局已累计的回答
    #[serde(default)]
    pub answers: AnswerSet,
}

/// 预测响应
///
/// 三种情况：给出猜测；给出下一个问题；两者都没有（放弃）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// 最终猜测
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,

    /// 下一个问题
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_question: Option<String>,

    /// 最佳实体的匹配率
    pub confidence: f64,

    /// 放弃时的提示
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 反馈请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    /// 猜测的（或用户告知的）实体
    pub entity: String,

    /// 猜测是否正确
    pub correct: bool,

    /// 本局全部回答
    #[serde(default)]
    pub answers: AnswerSet,
}

/// 反馈响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub status: String,
    pub new_entity: bool,
    pub adjusted_questions: usize,
    pub renormalized: bool,
}

impl From<FeedbackOutcome> for FeedbackResponse {
    fn from(outcome: FeedbackOutcome) -> Self {
        Self {
            status: "Feedback received and model updated".to_string(),
            new_entity: outcome.new_entity,
            adjusted_questions: outcome.adjusted_questions,
            renormalized: outcome.renormalized,
        }
    }
}

/// 加题请求（JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddQuestionRequest {
    /// 问题文本
    pub question: String,

    /// 类别标签
    #[serde(default)]
    pub categories: Vec<String>,
}

/// 加题查询参数（`?question=...`）
#[derive(Debug, Clone, Deserialize)]
pub struct AddQuestionParams {
    pub question: String,
}

/// 加题响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddQuestionResponse {
    pub status: String,
    /// 是否真正新增（已存在时为 false）
    pub added: bool,
}

/// 候选查询响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesResponse {
    pub candidates: Vec<String>,
    pub total: usize,
}
