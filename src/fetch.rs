//! 题目获取
//!
//! 启动时请求一次题库。失败只记录日志并返回错误，不重试。

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::models::{Question, TriviaItem, TriviaPayload};

/// 每道选择题的错误答案个数
pub const INCORRECT_PER_QUESTION: usize = 3;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("trivia request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("trivia API returned code {code}: {reason}")]
    Api { code: u8, reason: &'static str },
    #[error("malformed trivia payload: {0}")]
    Malformed(String),
}

/// API response_code 的含义
pub fn describe_response_code(code: u8) -> &'static str {
    match code {
        0 => "success",
        1 => "not enough questions for the query",
        2 => "invalid parameter",
        3 => "session token not found",
        4 => "session token exhausted",
        5 => "rate limited",
        _ => "unknown response code",
    }
}

#[derive(Clone, Debug)]
pub struct TriviaClient {
    client: Client,
    endpoint: Url,
    amount: u8,
}

impl TriviaClient {
    pub fn new(endpoint: Url, amount: u8, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
            amount,
        })
    }

    /// 完整请求地址：?amount=N&type=multiple
    pub fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("amount", &self.amount.to_string())
            .append_pair("type", "multiple");
        url
    }

    pub async fn fetch(&self) -> Result<Vec<Question>, FetchError> {
        let url = self.request_url();
        tracing::info!(%url, "fetching questions");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let questions = parse_payload(&body, self.amount)?;
        tracing::info!(count = questions.len(), "questions loaded");
        Ok(questions)
    }
}

/// 解析响应体并校验题目数量和选项个数
pub fn parse_payload(body: &str, amount: u8) -> Result<Vec<Question>, FetchError> {
    let payload: TriviaPayload =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    if payload.response_code != 0 {
        return Err(FetchError::Api {
            code: payload.response_code,
            reason: describe_response_code(payload.response_code),
        });
    }
    if payload.results.len() != usize::from(amount) {
        return Err(FetchError::Malformed(format!(
            "expected {amount} questions, got {}",
            payload.results.len()
        )));
    }

    payload
        .results
        .into_iter()
        .enumerate()
        .map(|(i, item)| to_question(i, item))
        .collect()
}

fn to_question(index: usize, item: TriviaItem) -> Result<Question, FetchError> {
    if item.incorrect_answers.len() != INCORRECT_PER_QUESTION {
        return Err(FetchError::Malformed(format!(
            "question {index} has {} incorrect answers",
            item.incorrect_answers.len()
        )));
    }

    Ok(Question {
        category: decode_entities(&item.category),
        difficulty: item.difficulty,
        text: decode_entities(&item.question),
        correct_answer: decode_entities(&item.correct_answer),
        incorrect_answers: item
            .incorrect_answers
            .iter()
            .map(String::as_str)
            .map(decode_entities)
            .collect(),
    })
}

/// 还原 HTML 实体（API 默认返回转义后的文本），无法识别的实体原样保留
pub fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let decoded = tail
            .find(';')
            .filter(|end| *end <= 10)
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code);
    }

    let c = match name {
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        "lt" => '<',
        "gt" => '>',
        "nbsp" => '\u{a0}',
        "shy" => '\u{ad}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "hellip" => '\u{2026}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "deg" => '\u{b0}',
        "eacute" => 'é',
        "Eacute" => 'É',
        "aacute" => 'á',
        "iacute" => 'í',
        "oacute" => 'ó',
        "uacute" => 'ú',
        "ntilde" => 'ñ',
        "ouml" => 'ö',
        "uuml" => 'ü',
        "auml" => 'ä',
        "ccedil" => 'ç',
        "pi" => 'π',
        _ => return None,
    };
    Some(c)
}
