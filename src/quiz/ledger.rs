use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{AnswerRecord, OptionId, Question};

/// 一次选择的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    New { is_correct: bool },
    /// 该题已有记录，首次选择为准
    AlreadyAnswered,
    InvalidOption,
}

/// 答题账本：题号 -> 记录，只含已作答的题
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerLedger {
    records: BTreeMap<usize, AnswerRecord>,
}

impl AnswerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次选择，正确性按文本与正确答案比较得出
    pub fn record(&mut self, index: usize, question: &Question, option: OptionId) -> Recorded {
        if self.records.contains_key(&index) {
            return Recorded::AlreadyAnswered;
        }
        let Some(text) = question.option_text(option) else {
            return Recorded::InvalidOption;
        };

        let is_correct = question.is_correct(text);
        self.records.insert(
            index,
            AnswerRecord {
                selected_option: text.to_string(),
                is_correct,
            },
        );
        Recorded::New { is_correct }
    }

    pub fn get(&self, index: usize) -> Option<&AnswerRecord> {
        self.records.get(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.records.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 答对的题数
    pub fn score(&self) -> usize {
        self.records.values().filter(|r| r.is_correct).count()
    }

    pub fn max_index(&self) -> Option<usize> {
        self.records.keys().next_back().copied()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question::new(
            "Largest planet?",
            "Jupiter",
            vec!["Mars".to_string(), "Venus".to_string(), "Earth".to_string()],
        )
    }

    #[test]
    fn test_record_correctness_matches_text_equality() {
        let q = question();
        for id in q.option_ids() {
            let mut ledger = AnswerLedger::new();
            let outcome = ledger.record(0, &q, id);
            let text = q.option_text(id).unwrap();
            let expected = text == q.correct_answer;

            assert_eq!(outcome, Recorded::New { is_correct: expected });
            let record = ledger.get(0).unwrap();
            assert_eq!(record.selected_option, text);
            assert_eq!(record.is_correct, expected);
        }
    }

    #[test]
    fn test_first_selection_wins() {
        let q = question();
        let mut ledger = AnswerLedger::new();

        ledger.record(3, &q, OptionId::Incorrect(0));
        let second = ledger.record(3, &q, OptionId::Correct);

        assert_eq!(second, Recorded::AlreadyAnswered);
        assert_eq!(ledger.get(3).unwrap().selected_option, "Mars");
        assert!(!ledger.get(3).unwrap().is_correct);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_duplicate_text_counts_as_correct() {
        // 错误答案与正确答案文本相同时按文本判定
        let q = Question::new(
            "Pick one",
            "Same",
            vec!["Same".to_string(), "Other".to_string(), "Third".to_string()],
        );
        let mut ledger = AnswerLedger::new();
        assert_eq!(
            ledger.record(0, &q, OptionId::Incorrect(0)),
            Recorded::New { is_correct: true }
        );
    }

    #[test]
    fn test_invalid_option_not_recorded() {
        let q = question();
        let mut ledger = AnswerLedger::new();
        assert_eq!(
            ledger.record(0, &q, OptionId::Incorrect(7)),
            Recorded::InvalidOption
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_sparse_keys_and_score() {
        let q = question();
        let mut ledger = AnswerLedger::new();
        ledger.record(0, &q, OptionId::Correct);
        ledger.record(4, &q, OptionId::Incorrect(1));
        ledger.record(12, &q, OptionId::Correct);

        assert!(ledger.contains(4));
        assert!(!ledger.contains(1));
        assert_eq!(ledger.score(), 2);
        assert_eq!(ledger.max_index(), Some(12));
    }

    #[test]
    fn test_json_snapshot_keys_are_strings() {
        let q = question();
        let mut ledger = AnswerLedger::new();
        ledger.record(0, &q, OptionId::Correct);
        ledger.record(2, &q, OptionId::Incorrect(2));

        insta::assert_snapshot!(
            ledger.to_json().unwrap(),
            @r#"{"0":{"answer":"Jupiter","correct":true},"2":{"answer":"Earth","correct":false}}"#
        );
    }

    #[test]
    fn test_json_reload() {
        let json = r#"{"1":{"answer":"Mars","correct":false},"10":{"answer":"Jupiter","correct":true}}"#;
        let ledger = AnswerLedger::from_json(json).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(10).unwrap().selected_option, "Jupiter");
        assert_eq!(ledger.score(), 1);
        assert_eq!(ledger.to_json().unwrap(), json);
    }
}
