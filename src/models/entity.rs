//! 实体目录数据模型
//!
//! 每个候选实体持有一份稀疏的问题 → 回答记录。目录按插入顺序保存，
//! 预测打平时取最先出现的实体。

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::models::answer::{Answer, AnswerSet, AnswerStatus};

/// 候选实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// 实体名称（唯一标识）
    pub name: String,

    /// 已记录的回答；缺失的问题视为未知
    #[serde(default)]
    pub answers: BTreeMap<String, Answer>,
}

impl Entity {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            answers: BTreeMap::new(),
        }
    }

    /// 追加一条记录
    pub fn with_answer(mut self, question: &str, answer: Answer) -> Self {
        self.answers.insert(question.to_string(), answer);
        self
    }

    /// 查询某个问题的记录状态
    pub fn status(&self, question: &str) -> AnswerStatus {
        AnswerStatus::from(self.answers.get(question).copied())
    }

    /// 是否与回答集中至少一个问题矛盾
    pub fn contradicts(&self, answers: &AnswerSet) -> bool {
        answers
            .iter()
            .any(|(question, answer)| self.status(question).agrees_with(*answer) == Some(false))
    }
}

/// 实体目录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Entity>", into = "Vec<Entity>")]
pub struct EntityCatalog {
    entities: Vec<Entity>,
}

impl From<Vec<Entity>> for EntityCatalog {
    fn from(entities: Vec<Entity>) -> Self {
        let mut seen = HashSet::new();
        let entities = entities
            .into_iter()
            .filter(|e| seen.insert(e.name.clone()))
            .collect();
        Self { entities }
    }
}

impl From<EntityCatalog> for Vec<Entity> {
    fn from(catalog: EntityCatalog) -> Self {
        catalog.entities
    }
}

impl EntityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// 写入实体的完整记录
    ///
    /// 已存在的实体原位替换记录（保留目录位置），否则追加到末尾。
    /// 返回是否为新实体。
    pub fn upsert(&mut self, name: &str, answers: AnswerSet) -> bool {
        match self.entities.iter_mut().find(|e| e.name == name) {
            Some(entity) => {
                entity.answers = answers;
                false
            }
            None => {
                self.entities.push(Entity {
                    name: name.to_string(),
                    answers,
                });
                true
            }
        }
    }
}
