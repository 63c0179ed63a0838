use async_trait::async_trait;
use log::debug;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };

use super::{ ChatClient, CompletionResponse, MAX_TOKENS, TEMPERATURE };
use crate::llm::{ LlmConfig, LlmError };
use crate::models::chat::PromptMessage;

const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub struct GroqChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
}

#[derive(Serialize, Deserialize)]
struct GroqMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct GroqRequest {
    messages: Vec<GroqMessage>,
    model: String,
    temperature: f32,
    #[serde(rename = "max_tokens")]
    max_tokens: u32,
}

#[derive(Deserialize)]
struct GroqResponse {
    #[serde(default)]
    choices: Vec<GroqChoice>,
}

#[derive(Deserialize)]
struct GroqChoice {
    message: GroqMessage,
}

impl GroqChatClient {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>
    ) -> Result<Self, LlmError> {
        let chat_model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e|
                LlmError::InvalidApiKey(e.to_string())
            )?
        );

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            model: chat_model,
            base_url: api_url,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Self::new(config.api_key.clone(), config.completion_model.clone(), config.base_url.clone())
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatClient for GroqChatClient {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<CompletionResponse, LlmError> {
        let url = self.completions_url();

        let req = GroqRequest {
            messages: messages
                .iter()
                .map(|m| GroqMessage {
                    role: m.role.as_str().to_string(),
                    content: Some(m.content.clone()),
                })
                .collect(),
            model: self.model.clone(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!("Sending {} messages to Groq at {}", messages.len(), url);
        let resp = self.http.post(&url).json(&req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Status { status: status.as_u16(), body });
        }

        let parsed = resp.json::<GroqResponse>().await?;
        let content = parsed.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)?;

        Ok(CompletionResponse { response: content })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        Some(self.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ChatRole;
    use axum::{ routing::post, Json, Router, http::{ HeaderMap as AxumHeaders, StatusCode } };
    use serde_json::{ json, Value };

    async fn echo_handler(headers: AxumHeaders, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let reply = format!(
            "{}|{}|{}|{}|{}",
            auth,
            body["model"].as_str().unwrap_or_default(),
            body["temperature"],
            body["max_tokens"],
            body["messages"].as_array().map(|m| m.len()).unwrap_or_default()
        );
        (
            StatusCode::OK,
            Json(json!({ "choices": [{ "message": { "role": "assistant", "content": reply } }] })),
        )
    }

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/openai/v1/", addr)
    }

    fn prompt() -> Vec<PromptMessage> {
        vec![
            PromptMessage::new(ChatRole::System, "sys"),
            PromptMessage::new(ChatRole::User, "Hello")
        ]
    }

    #[tokio::test]
    async fn sends_fixed_parameters_and_reads_first_choice() {
        let base = spawn_upstream(
            Router::new().route("/openai/v1/chat/completions", post(echo_handler))
        ).await;
        let client = GroqChatClient::new("gsk_test".into(), None, Some(base)).unwrap();

        let resp = client.complete(&prompt()).await.unwrap();
        assert_eq!(resp.response, "Bearer gsk_test|llama-3.1-70b-versatile|0.7|1024|2");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let base = spawn_upstream(
            Router::new().route(
                "/openai/v1/chat/completions",
                post(|| async { (StatusCode::UNAUTHORIZED, "bad key") })
            )
        ).await;
        let client = GroqChatClient::new("gsk_test".into(), None, Some(base)).unwrap();

        match client.complete(&prompt()).await {
            Err(LlmError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.response)),
        }
    }

    #[tokio::test]
    async fn missing_choices_is_an_empty_response() {
        let base = spawn_upstream(
            Router::new().route(
                "/openai/v1/chat/completions",
                post(|| async { Json(json!({ "choices": [] })) })
            )
        ).await;
        let client = GroqChatClient::new("gsk_test".into(), None, Some(base)).unwrap();

        assert!(matches!(client.complete(&prompt()).await, Err(LlmError::EmptyResponse)));
    }

    #[tokio::test]
    async fn malformed_body_is_a_request_error() {
        let base = spawn_upstream(
            Router::new().route("/openai/v1/chat/completions", post(|| async { "not json" }))
        ).await;
        let client = GroqChatClient::new("gsk_test".into(), None, Some(base)).unwrap();

        assert!(matches!(client.complete(&prompt()).await, Err(LlmError::Request(_))));
    }

    #[test]
    fn api_key_with_newline_is_rejected() {
        let result = GroqChatClient::new("bad\nkey".into(), None, None);
        assert!(matches!(result, Err(LlmError::InvalidApiKey(_))));
    }
}
