//! 猜测引擎服务
//!
//! 全进程共享一个实例。读操作（预测、选题、快照）持读锁并发执行；
//! 写操作（加题、反馈）持写锁串行执行，并在持久化成功后才提交到内存，
//! 保证内存状态与存储状态一致。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::config::config::EngineConfig;
use crate::error::{AppError, Result};
use crate::models::answer::AnswerSet;
use crate::models::entity::{Entity, EntityCatalog};
use crate::models::question::{Question, QuestionBank};
use crate::models::seed;
use crate::services::candidate_filter::candidate_names;
use crate::services::feedback::{FeedbackOutcome, FeedbackPolicy, apply_feedback};
use crate::services::predictor::{Prediction, PredictionThresholds, predict};
use crate::services::selector::QuestionSelector;
use crate::storage::repository::StateStore;

/// 问题样本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionSample {
    pub question: String,
    pub weight: f64,
}

/// 调试快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugSnapshot {
    pub question_count: usize,
    pub entity_count: usize,
    pub sample_entities: Vec<String>,
    pub sample_questions: Vec<QuestionSample>,
    pub thresholds: PredictionThresholds,
}

/// 一轮问答的结果：猜测或下一个问题，都基于同一份状态
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub prediction: Prediction,
    /// 已给出猜测时为空
    pub next_question: Option<String>,
}

/// 完整状态导出（管理端使用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateExport {
    pub questions: Vec<Question>,
    pub entities: Vec<Entity>,
}

/// 猜测服务 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuessService: Send + Sync {
    /// 预测实体
    async fn predict(&self, answers: &AnswerSet) -> Prediction;

    /// 选择下一个问题
    async fn next_question(&self, answers: &AnswerSet) -> Option<String>;

    /// 先尝试猜测，未给出猜测时再选下一个问题
    async fn play_round(&self, answers: &AnswerSet) -> Round;

    /// 与回答集一致的候选实体
    async fn candidates(&self, answers: &AnswerSet) -> Vec<String>;

    /// 根据用户反馈调整
    async fn update_from_feedback(
        &self,
        entity: &str,
        answers: &AnswerSet,
        correct: bool,
    ) -> Result<FeedbackOutcome>;

    /// 添加问题，返回是否真正新增
    async fn add_question(&self, text: &str) -> Result<bool> {
        self.add_question_with_categories(text, Vec::new()).await
    }

    /// 添加带类别标签的问题
    async fn add_question_with_categories(
        &self,
        text: &str,
        categories: Vec<String>,
    ) -> Result<bool>;

    /// 调试快照
    async fn debug_snapshot(&self) -> DebugSnapshot;

    /// 导出问题库与实体目录
    async fn export_state(&self) -> StateExport;
}

#[derive(Debug, Clone)]
struct EngineState {
    bank: QuestionBank,
    catalog: EntityCatalog,
}

impl EngineState {
    fn predict(&self, answers: &AnswerSet, thresholds: PredictionThresholds) -> Prediction {
        let prediction = predict(&self.catalog, &self.bank, answers, thresholds);
        debug!(
            "Predict over {} answers: {:?} ({:.3})",
            answers.len(),
            prediction.entity,
            prediction.confidence
        );
        prediction
    }

    fn next_question(&self, answers: &AnswerSet, config: &EngineConfig) -> Option<String> {
        let selector = QuestionSelector {
            bank: &self.bank,
            catalog: &self.catalog,
            root_questions: &config.root_questions,
            rules: &config.relevance_rules,
        };

        let selection = selector.select(answers)?;
        debug!(
            "Next question {:?} selected by {:?}",
            selection.question.text, selection.reason
        );
        Some(selection.question.text.clone())
    }
}

/// 猜测引擎
pub struct GuessEngine {
    state: RwLock<EngineState>,
    store: Arc<dyn StateStore>,
    config: EngineConfig,
}

impl GuessEngine {
    /// 从存储加载状态；两条记录分别缺失时各自回退到种子数据
    pub async fn load(config: EngineConfig, store: Arc<dyn StateStore>) -> Result<Self> {
        let mut bank = match store.load_question_bank().await? {
            Some(bank) => bank,
            None => {
                warn!(
                    "No stored question bank in {} store, using seed questions",
                    store.backend_name()
                );
                seed::question_bank()
            }
        };

        if bank.renormalize(config.renormalize_threshold, config.renormalize_target) {
            warn!(
                "Stored question weights exceeded {}, rescaled to a maximum of {}",
                config.renormalize_threshold, config.renormalize_target
            );
        }

        let catalog = match store.load_entity_catalog().await? {
            Some(catalog) => catalog,
            None => {
                warn!(
                    "No stored entity catalog in {} store, using seed entities",
                    store.backend_name()
                );
                seed::entity_catalog()
            }
        };

        info!(
            "Guess engine loaded: {} questions, {} entities",
            bank.len(),
            catalog.len()
        );
        Ok(Self::with_state(config, store, bank, catalog))
    }

    pub fn with_state(
        config: EngineConfig,
        store: Arc<dyn StateStore>,
        bank: QuestionBank,
        catalog: EntityCatalog,
    ) -> Self {
        Self {
            state: RwLock::new(EngineState { bank, catalog }),
            store,
            config,
        }
    }

    pub fn thresholds(&self) -> PredictionThresholds {
        PredictionThresholds {
            min_questions: self.config.min_questions,
            min_confidence: self.config.min_confidence,
        }
    }

    async fn persist_bank(&self, bank: &QuestionBank) -> Result<()> {
        self.store.save_question_bank(bank).await.map_err(|e| {
            error!("Failed to persist question bank: {}", e);
            e
        })
    }

    async fn persist_catalog(&self, catalog: &EntityCatalog) -> Result<()> {
        self.store.save_entity_catalog(catalog).await.map_err(|e| {
            error!("Failed to persist entity catalog: {}", e);
            e
        })
    }
}

#[async_trait]
impl GuessService for GuessEngine {
    async fn predict(&self, answers: &AnswerSet) -> Prediction {
        let state = self.state.read().await;
        state.predict(answers, self.thresholds())
    }

    async fn next_question(&self, answers: &AnswerSet) -> Option<String> {
        let state = self.state.read().await;
        state.next_question(answers, &self.config)
    }

    async fn play_round(&self, answers: &AnswerSet) -> Round {
        let state = self.state.read().await;
        let prediction = state.predict(answers, self.thresholds());
        let next_question = match prediction.entity {
            Some(_) => None,
            None => state.next_question(answers, &self.config),
        };

        Round {
            prediction,
            next_question,
        }
    }

    async fn candidates(&self, answers: &AnswerSet) -> Vec<String> {
        let state = self.state.read().await;
        candidate_names(&state.catalog, answers)
    }

    async fn update_from_feedback(
        &self,
        entity: &str,
        answers: &AnswerSet,
        correct: bool,
    ) -> Result<FeedbackOutcome> {
        if entity.trim().is_empty() {
            return Err(AppError::Validation("Entity name cannot be empty".to_string()));
        }

        let mut state = self.state.write().await;
        let mut bank = state.bank.clone();
        let mut catalog = state.catalog.clone();

        let outcome = apply_feedback(
            &mut bank,
            &mut catalog,
            entity,
            answers,
            correct,
            &FeedbackPolicy::from(&self.config),
        );

        self.persist_bank(&bank).await?;
        if let Err(e) = self.persist_catalog(&catalog).await {
            // 问题库已写入，回写旧版本以保持两条记录一致
            if let Err(restore) = self.store.save_question_bank(&state.bank).await {
                warn!("Failed to restore previous question bank: {}", restore);
            }
            return Err(e);
        }

        state.bank = bank;
        state.catalog = catalog;

        info!(
            entity,
            correct,
            adjusted = outcome.adjusted_questions,
            new_entity = outcome.new_entity,
            renormalized = outcome.renormalized,
            "Feedback applied"
        );
        Ok(outcome)
    }

    async fn add_question_with_categories(
        &self,
        text: &str,
        categories: Vec<String>,
    ) -> Result<bool> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("Question text cannot be empty".to_string()));
        }

        let mut state = self.state.write().await;
        if state.bank.contains(text) {
            debug!("Question already exists: {}", text);
            return Ok(false);
        }

        let mut bank = state.bank.clone();
        bank.add(Question::new(text).with_categories(categories));
        self.persist_bank(&bank).await?;
        state.bank = bank;

        info!("Question added: {} ({} total)", text, state.bank.len());
        Ok(true)
    }

    async fn debug_snapshot(&self) -> DebugSnapshot {
        let state = self.state.read().await;
        let sample_size = self.config.sample_size;

        DebugSnapshot {
            question_count: state.bank.len(),
            entity_count: state.catalog.len(),
            sample_entities: state
                .catalog
                .iter()
                .take(sample_size)
                .map(|e| e.name.clone())
                .collect(),
            sample_questions: state
                .bank
                .iter()
                .take(sample_size)
                .map(|q| QuestionSample {
                    question: q.text.clone(),
                    weight: q.weight,
                })
                .collect(),
            thresholds: self.thresholds(),
        }
    }

    async fn export_state(&self) -> StateExport {
        let state = self.state.read().await;
        StateExport {
            questions: state.bank.clone().into(),
            entities: state.catalog.clone().into(),
        }
    }
}

/// 加载并创建猜测服务
pub async fn create_guess_service(
    config: EngineConfig,
    store: Arc<dyn StateStore>,
) -> Result<Arc<dyn GuessService>> {
    Ok(Arc::new(GuessEngine::load(config, store).await?))
}
