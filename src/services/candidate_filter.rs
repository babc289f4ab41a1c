//! 候选过滤
//!
//! 排除与已回答问题矛盾的实体。实体没有记录的问题不会排除它。

use crate::models::answer::AnswerSet;
use crate::models::entity::{Entity, EntityCatalog};

/// 与回答集一致的实体，保持目录顺序
pub fn filter_candidates<'a>(catalog: &'a EntityCatalog, answers: &AnswerSet) -> Vec<&'a Entity> {
    catalog
        .iter()
        .filter(|entity| !entity.contradicts(answers))
        .collect()
}

/// 与回答集一致的实体名称
pub fn candidate_names(catalog: &EntityCatalog, answers: &AnswerSet) -> Vec<String> {
    filter_candidates(catalog, answers)
        .into_iter()
        .map(|entity| entity.name.clone())
        .collect()
}
