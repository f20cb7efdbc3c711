use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Question;
use crate::quiz::AnswerLedger;

const ANSWERS_FILE: &str = "userAnswers.json";
const QUESTIONS_FILE: &str = "questions.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 本地持久化：答题账本快照与题库缓存
#[derive(Debug, Clone)]
pub struct LedgerStore {
    answers_path: PathBuf,
    questions_path: PathBuf,
}

impl LedgerStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            answers_path: data_dir.join(ANSWERS_FILE),
            questions_path: data_dir.join(QUESTIONS_FILE),
        }
    }

    #[allow(dead_code)]
    pub fn answers_path(&self) -> &Path {
        &self.answers_path
    }

    /// 写入完整账本快照（每次作答后调用）
    pub fn save_ledger(&self, ledger: &AnswerLedger) -> Result<(), StorageError> {
        let content = ledger.to_json().map_err(|source| StorageError::Json {
            path: self.answers_path.clone(),
            source,
        })?;
        write_file(&self.answers_path, &content)
    }

    /// 读取账本快照，文件不存在时返回 None
    pub fn load_ledger(&self) -> Result<Option<AnswerLedger>, StorageError> {
        let Some(content) = read_file(&self.answers_path)? else {
            return Ok(None);
        };
        AnswerLedger::from_json(&content)
            .map(Some)
            .map_err(|source| StorageError::Json {
                path: self.answers_path.clone(),
                source,
            })
    }

    /// 缓存本次获取的题库，供 --resume 使用
    pub fn save_questions(&self, questions: &[Question]) -> Result<(), StorageError> {
        let content =
            serde_json::to_string_pretty(questions).map_err(|source| StorageError::Json {
                path: self.questions_path.clone(),
                source,
            })?;
        write_file(&self.questions_path, &content)
    }

    pub fn load_questions(&self) -> Result<Option<Vec<Question>>, StorageError> {
        let Some(content) = read_file(&self.questions_path)? else {
            return Ok(None);
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StorageError::Json {
                path: self.questions_path.clone(),
                source,
            })
    }

    /// 新会话开始时清掉旧快照
    pub fn clear_ledger(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.answers_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                path: self.answers_path.clone(),
                source,
            }),
        }
    }
}

fn read_file(path: &Path) -> Result<Option<String>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn write_file(path: &Path, content: &str) -> Result<(), StorageError> {
    fs::write(path, content).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionId;

    fn question() -> Question {
        Question::new(
            "Speed of light?",
            "299,792 km/s",
            vec![
                "150,000 km/s".to_string(),
                "1,000 km/s".to_string(),
                "3,000 km/s".to_string(),
            ],
        )
    }

    #[test]
    fn test_missing_files_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path());

        assert!(store.load_ledger().unwrap().is_none());
        assert!(store.load_questions().unwrap().is_none());
    }

    #[test]
    fn test_ledger_written_after_each_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path());
        let q = question();
        let mut ledger = AnswerLedger::new();

        ledger.record(0, &q, OptionId::Correct);
        store.save_ledger(&ledger).unwrap();
        let on_disk = fs::read_to_string(store.answers_path()).unwrap();
        assert_eq!(on_disk, r#"{"0":{"answer":"299,792 km/s","correct":true}}"#);

        ledger.record(1, &q, OptionId::Incorrect(0));
        store.save_ledger(&ledger).unwrap();
        assert_eq!(store.load_ledger().unwrap(), Some(ledger));
    }

    #[test]
    fn test_questions_cache_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path());
        let questions = vec![question(), question()];

        store.save_questions(&questions).unwrap();
        assert_eq!(store.load_questions().unwrap(), Some(questions));
    }

    #[test]
    fn test_corrupt_snapshot_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path());
        fs::write(store.answers_path(), "not json").unwrap();

        let err = store.load_ledger().unwrap_err();
        assert!(matches!(err, StorageError::Json { .. }));
        assert!(err.to_string().contains(ANSWERS_FILE));
    }

    #[test]
    fn test_clear_ledger_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path());
        let mut ledger = AnswerLedger::new();
        ledger.record(0, &question(), OptionId::Correct);
        store.save_ledger(&ledger).unwrap();

        store.clear_ledger().unwrap();
        store.clear_ledger().unwrap();
        assert!(store.load_ledger().unwrap().is_none());
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(&dir.path().join("nope"));
        let err = store.save_ledger(&AnswerLedger::new()).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
