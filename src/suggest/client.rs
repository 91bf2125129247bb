//! Chat Completions API クライアント

use super::Suggester;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// デフォルトのモデルID
const DEFAULT_MODEL: &str = "gpt-3.5-turbo-0125";

/// ファイル名提案用の固定システムプロンプト
const SYSTEM_PROMPT: &str = "You are a helpful assistant. Look at the content provided and suggest a filename that accurately reflects the content. The filename should only include letters, numbers, and underscores, and be no longer than 50 characters. Exclude any extensions like '.pdf' or '.txt'.";

/// Chat Completions APIクライアント
pub struct SuggestClient {
    api_key: String,
    model: String,
    http_client: reqwest::Client,
}

impl SuggestClient {
    /// 環境変数からクライアントを作成
    ///
    /// `OPENAI_API_KEY` が必須。`OPENAI_MODEL` でモデルIDを上書きできる。
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .context("環境変数 OPENAI_API_KEY が設定されていません")?;
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            model,
            http_client: reqwest::Client::new(),
        })
    }

    /// 抽出テキストを送信して最初の候補を取得
    async fn complete(&self, text: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
        };

        let response = self
            .http_client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Chat Completions APIリクエストに失敗")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat Completions API エラー ({}): {}", status, error_text);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Chat Completions APIレスポンスのパースに失敗")?;

        first_choice_content(chat_response)
    }
}

#[async_trait]
impl Suggester for SuggestClient {
    async fn suggest_filename(&self, text: &str) -> Result<String> {
        self.complete(text).await
    }
}

/// レスポンスから最初の候補のテキストを取り出す
fn first_choice_content(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .context("レスポンスに候補が含まれていません")
}

// Chat Completions API リクエスト/レスポンス構造体

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_choice_content() {
        let json = r#"{"choices":[{"message":{"content":"QuarterlyReport"}},{"message":{"content":"Ignored"}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(first_choice_content(response).unwrap(), "QuarterlyReport");
    }

    #[test]
    fn rejects_empty_choices() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(first_choice_content(response).is_err());
    }

    #[test]
    fn rejects_malformed_response() {
        assert!(serde_json::from_str::<ChatResponse>(r#"{"unexpected":true}"#).is_err());
    }

    #[test]
    fn request_body_has_expected_shape() {
        let request = ChatRequest {
            model: DEFAULT_MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: "請求書の本文".to_string(),
                },
            ],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo-0125");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "請求書の本文");
    }
}
