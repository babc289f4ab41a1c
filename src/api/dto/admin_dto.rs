//! 管理端 DTO

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::models::answer::Answer;
use crate::models::entity::Entity;
use crate::models::question::Question;
use crate::services::engine::StateExport;

/// 问题详情
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDto {
    pub question: String,
    pub weight: f64,
    pub categories: Vec<String>,
}

impl From<Question> for QuestionDto {
    fn from(question: Question) -> Self {
        Self {
            question: question.text,
            weight: question.weight,
            categories: question.categories,
        }
    }
}

/// 实体详情
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDto {
    pub name: String,
    pub answers: BTreeMap<String, Answer>,
}

impl From<Entity> for EntityDto {
    fn from(entity: Entity) -> Self {
        Self {
            name: entity.name,
            answers: entity.answers,
        }
    }
}

/// 实体以 `名称 → 回答` 的对象输出，键按目录顺序排列
fn serialize_entities<S>(entities: &[EntityDto], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(entities.iter().map(|e| (&e.name, &e.answers)))
}

/// 管理端数据响应
#[derive(Debug, Clone, Serialize)]
pub struct AdminDataResponse {
    /// 问题文本（问题库顺序）
    pub questions: Vec<String>,

    /// 问题权重与标签
    pub question_details: Vec<QuestionDto>,

    /// 实体（目录顺序）
    #[serde(serialize_with = "serialize_entities")]
    pub entities: Vec<EntityDto>,
}

impl From<StateExport> for AdminDataResponse {
    fn from(export: StateExport) -> Self {
        Self {
            questions: export.questions.iter().map(|q| q.text.clone()).collect(),
            question_details: export.questions.into_iter().map(QuestionDto::from).collect(),
            entities: export.entities.into_iter().map(EntityDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed;

    #[test]
    fn test_entities_serialize_as_ordered_object() {
        let response = AdminDataResponse::from(StateExport {
            questions: seed::question_bank().into(),
            entities: seed::entity_catalog().into(),
        });
        let json = serde_json::to_string(&response).unwrap();

        let positions: Vec<usize> = ["\"dog\":", "\"cat\":", "\"fish\":", "\"bird\":", "\"elephant\":"]
            .iter()
            .map(|key| json.find(key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["entities"]["dog"]["Is it a pet?"], 1);
        assert_eq!(value["entities"]["fish"]["Is it a mammal?"], 0);
        assert_eq!(value["questions"][0], seed::IS_ANIMAL);
    }
}
