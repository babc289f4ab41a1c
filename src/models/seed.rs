//! 内置种子数据
//!
//! 持久化存储中没有状态时使用。

use crate::models::answer::Answer;
use crate::models::entity::{Entity, EntityCatalog};
use crate::models::question::{Question, QuestionBank};
use crate::models::taxonomy::RelevanceRule;

pub const IS_ANIMAL: &str = "Is it an animal?";
pub const IS_PERSON: &str = "Is it a person?";
pub const IS_OBJECT: &str = "Is it an object?";
pub const IS_PLACE: &str = "Is it a place?";

pub const ANIMAL: &str = "animal";
pub const PERSON: &str = "person";

/// 根分类问题，空回答集时按此顺序提问
pub fn root_questions() -> Vec<String> {
    [IS_ANIMAL, IS_PERSON, IS_OBJECT, IS_PLACE]
        .iter()
        .map(|q| q.to_string())
        .collect()
}

pub fn relevance_rules() -> Vec<RelevanceRule> {
    vec![
        RelevanceRule::new(IS_ANIMAL, Answer::No, ANIMAL),
        RelevanceRule::new(IS_PERSON, Answer::No, PERSON),
    ]
}

pub fn question_bank() -> QuestionBank {
    let questions = vec![
        Question::new(IS_ANIMAL),
        Question::new("Does it live in water?").with_categories([ANIMAL]),
        Question::new("Is it a mammal?").with_categories([ANIMAL]),
        Question::new("Can it fly?"),
        Question::new("Is it a pet?").with_categories([ANIMAL]),
        Question::new("Is it larger than a human?"),
        Question::new("Is it a predator?").with_categories([ANIMAL]),
        Question::new("Does it have fur?").with_categories([ANIMAL]),
        Question::new("Is it a farm animal?").with_categories([ANIMAL]),
        Question::new("Is it a bird?").with_categories([ANIMAL]),
        Question::new(IS_PERSON),
        Question::new("Is it a real person?").with_categories([PERSON]),
        Question::new("Is the person still alive?").with_categories([PERSON]),
        Question::new("Is it known for sports?").with_categories([PERSON]),
        Question::new(IS_OBJECT),
        Question::new(IS_PLACE),
        Question::new("Is it larger than a microwave?"),
        Question::new("Is it common in households?"),
    ];
    QuestionBank::from(questions)
}

pub fn entity_catalog() -> EntityCatalog {
    use Answer::{No, Yes};

    let entities = vec![
        Entity::new("dog")
            .with_answer(IS_ANIMAL, Yes)
            .with_answer("Does it live in water?", No)
            .with_answer("Is it a mammal?", Yes)
            .with_answer("Can it fly?", No)
            .with_answer("Is it a pet?", Yes),
        Entity::new("cat")
            .with_answer(IS_ANIMAL, Yes)
            .with_answer("Does it live in water?", No)
            .with_answer("Is it a mammal?", Yes)
            .with_answer("Can it fly?", No)
            .with_answer("Is it a pet?", Yes)
            .with_answer("Is it a predator?", Yes),
        Entity::new("fish")
            .with_answer(IS_ANIMAL, Yes)
            .with_answer("Does it live in water?", Yes)
            .with_answer("Is it a mammal?", No),
        Entity::new("bird")
            .with_answer(IS_ANIMAL, Yes)
            .with_answer("Does it live in water?", No)
            .with_answer("Can it fly?", Yes),
        Entity::new("elephant")
            .with_answer(IS_ANIMAL, Yes)
            .with_answer("Does it live in water?", No)
            .with_answer("Is it a mammal?", Yes)
            .with_answer("Can it fly?", No)
            .with_answer("Is it larger than a human?", Yes),
    ];
    EntityCatalog::from(entities)
}
