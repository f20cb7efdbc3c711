use serde::{Deserialize, Serialize};

/// 选项身份：正确答案或第 i 个错误答案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionId {
    Correct,
    Incorrect(usize),
}

/// 单道选择题（获取后不可变）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    pub text: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl Question {
    #[allow(dead_code)]
    pub fn new(
        text: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
    ) -> Self {
        Self {
            category: String::new(),
            difficulty: String::new(),
            text: text.into(),
            correct_answer: correct_answer.into(),
            incorrect_answers,
        }
    }

    /// 所有选项的身份（错误答案在前，正确答案最后，未打乱）
    pub fn option_ids(&self) -> Vec<OptionId> {
        let mut ids = Vec::with_capacity(self.incorrect_answers.len() + 1);
        ids.extend((0..self.incorrect_answers.len()).map(OptionId::Incorrect));
        ids.push(OptionId::Correct);
        ids
    }

    /// 根据身份取选项文本
    pub fn option_text(&self, id: OptionId) -> Option<&str> {
        match id {
            OptionId::Correct => Some(&self.correct_answer),
            OptionId::Incorrect(i) => self.incorrect_answers.get(i).map(String::as_str),
        }
    }

    pub fn is_correct(&self, option: &str) -> bool {
        option == self.correct_answer
    }
}

/// 答题记录，持久化为 {"answer": ..., "correct": ...}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    #[serde(rename = "answer")]
    pub selected_option: String,
    #[serde(rename = "correct")]
    pub is_correct: bool,
}

/// API 响应结构
#[derive(Debug, Clone, Deserialize)]
pub struct TriviaPayload {
    pub response_code: u8,
    #[serde(default)]
    pub results: Vec<TriviaItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TriviaItem {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capital() -> Question {
        Question::new(
            "Capital of France?",
            "Paris",
            vec!["Lyon".to_string(), "Nice".to_string(), "Lille".to_string()],
        )
    }

    #[test]
    fn test_option_ids_cover_every_answer_once() {
        let q = capital();
        let ids = q.option_ids();
        assert_eq!(ids.len(), 4);

        let mut texts: Vec<&str> = ids.iter().filter_map(|id| q.option_text(*id)).collect();
        texts.sort_unstable();
        assert_eq!(texts, vec!["Lille", "Lyon", "Nice", "Paris"]);
    }

    #[test]
    fn test_option_text_out_of_range() {
        let q = capital();
        assert_eq!(q.option_text(OptionId::Incorrect(3)), None);
        assert_eq!(q.option_text(OptionId::Correct), Some("Paris"));
    }

    #[test]
    fn test_answer_record_json_keys() {
        let record = AnswerRecord {
            selected_option: "Paris".to_string(),
            is_correct: true,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"answer":"Paris","correct":true}"#);
    }

    #[test]
    fn test_payload_ignores_unknown_fields() {
        let json = r#"{
            "response_code": 0,
            "results": [{
                "type": "multiple",
                "difficulty": "easy",
                "category": "Geography",
                "question": "Capital of France?",
                "correct_answer": "Paris",
                "incorrect_answers": ["Lyon", "Nice", "Lille"]
            }]
        }"#;
        let payload: TriviaPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.response_code, 0);
        assert_eq!(payload.results.len(), 1);
        assert_eq!(payload.results[0].category, "Geography");
    }
}
