//! 服务模块

pub mod candidate_filter;
pub mod engine;
pub mod feedback;
pub mod predictor;
pub mod ranker;
pub mod relevance;
pub mod selector;

pub use candidate_filter::{candidate_names, filter_candidates};
pub use engine::{
    DebugSnapshot, GuessEngine, GuessService, QuestionSample, Round, StateExport,
    create_guess_service,
};
pub use feedback::{FeedbackOutcome, FeedbackPolicy, apply_feedback};
pub use predictor::{Prediction, PredictionThresholds, predict};
pub use ranker::{SplitTally, best_question, information_gain};
pub use relevance::RelevanceFilter;
pub use selector::{QuestionSelector, Selection, SelectionReason};
