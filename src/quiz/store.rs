use crate::models::Question;

use super::QuizError;

/// 题库与当前游标
///
/// 游标始终落在 `[0, len - 1]` 内。是否允许前进由导航控制决定，这里只管边界。
#[derive(Debug, Clone)]
pub struct QuestionStore {
    questions: Vec<Question>,
    cursor: usize,
}

impl QuestionStore {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        Ok(Self {
            questions,
            cursor: 0,
        })
    }

    pub fn current(&self) -> &Question {
        &self.questions[self.cursor]
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.questions.len()
    }

    /// 前进一题，已在末题时返回 false
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// 后退一题，已在首题时返回 false
    pub fn retreat(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.cursor -= 1;
        true
    }
}
