use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::types::{ChatFuture, ChatRequest, LLMClient, LLMMessage, LLMMessageType, RawChatFn};
use crate::utils::to_data_url;

pub fn chat(client: LLMClient) -> RawChatFn {
    let http_client = Client::new();
    Arc::new(move |payload: Value| -> ChatFuture {
        let client = client.clone();
        let http_client = http_client.clone();
        Box::pin(async move { send_chat_completion(&http_client, &client, payload).await })
    })
}

/// Posts `payload` and decodes whatever comes back as JSON.
///
/// The status code is not inspected: an error body from the API is returned
/// like any other reply. Only transport failures and non-JSON bodies fail.
async fn send_chat_completion(
    http_client: &Client,
    client: &LLMClient,
    payload: Value,
) -> Result<Value> {
    let url = format!(
        "{}/chat/completions",
        client.endpoint().trim_end_matches('/')
    );

    let mut request = http_client
        .post(&url)
        .header("Content-Type", "application/json")
        .json(&payload);
    if let Some(api_key) = client.api_key() {
        request = request.bearer_auth(api_key);
    }

    let response = request
        .send()
        .await
        .with_context(|| format!("OpenAI request to {url} failed"))?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%status, "OpenAI returned non-success status");
    }

    let response_text = response
        .text()
        .await
        .context("Failed to read OpenAI response body")?;

    serde_json::from_str(&response_text)
        .with_context(|| format!("Failed to decode OpenAI response JSON: {response_text}"))
}

pub fn build_chat_payload(request: &ChatRequest) -> Value {
    json!({
        "model": request.model,
        "messages": convert_messages_to_openai(&request.messages),
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
        "seed": request.seed
    })
}

fn convert_messages_to_openai(messages: &[LLMMessage]) -> Vec<Value> {
    messages.iter().map(convert_message).collect()
}

fn convert_message(message: &LLMMessage) -> Value {
    let content_items: Vec<Value> = message
        .content
        .iter()
        .map(|part| match part {
            LLMMessageType::TEXT(text) => json!({
                "type": "text",
                "text": text
            }),
            LLMMessageType::IMAGE {
                data_b64,
                mime_type,
            } => json!({
                "type": "image_url",
                "image_url": { "url": to_data_url(mime_type, data_b64) }
            }),
        })
        .collect();

    json!({
        "role": message.role.as_openai_role(),
        "content": content_items
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers a single HTTP request with `status` and `body`, resolving to
    /// the raw request text it received.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let read = socket.read(&mut chunk).await.unwrap();
                if read == 0 {
                    break;
                }
                received.extend_from_slice(&chunk[..read]);
                let text = String::from_utf8_lossy(&received);
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let content_length = text[..head_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if received.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8(received).unwrap()
        });

        (base_url, handle)
    }

    fn local_http_client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    fn request_head(request: &str) -> String {
        request
            .split("\r\n\r\n")
            .next()
            .unwrap()
            .to_ascii_lowercase()
    }

    #[tokio::test]
    async fn posts_to_chat_completions_under_endpoint() {
        let (base_url, server) = serve_once("200 OK", r#"{"id":"chatcmpl-1","choices":[]}"#).await;
        let client = LLMClient::new(Some("sk-test".to_string()), format!("{base_url}/v1/"));
        let payload = build_chat_payload(&sample_request());

        let reply = send_chat_completion(&local_http_client(), &client, payload.clone())
            .await
            .unwrap();
        assert_eq!(reply, json!({ "id": "chatcmpl-1", "choices": [] }));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/chat/completions HTTP/1.1\r\n"));
        let head = request_head(&request);
        assert!(head.contains("authorization: bearer sk-test"));
        assert!(head.contains("content-type: application/json"));

        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let sent: Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent, payload);
    }

    #[tokio::test]
    async fn omits_authorization_without_api_key() {
        let (base_url, server) = serve_once("200 OK", "{}").await;
        let client = LLMClient::new(None, base_url);

        send_chat_completion(&local_http_client(), &client, json!({}))
            .await
            .unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /chat/completions HTTP/1.1\r\n"));
        assert!(!request_head(&request).contains("authorization:"));
    }

    #[tokio::test]
    async fn error_status_with_json_body_is_returned() {
        let error_body = r#"{"error":{"message":"Incorrect API key provided","code":"invalid_api_key"}}"#;
        let (base_url, server) = serve_once("401 Unauthorized", error_body).await;
        let client = LLMClient::new(Some("sk-wrong".to_string()), base_url);

        let reply = send_chat_completion(&local_http_client(), &client, json!({}))
            .await
            .unwrap();
        assert_eq!(reply["error"]["code"], "invalid_api_key");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn non_json_body_is_an_error() {
        let (base_url, server) = serve_once("502 Bad Gateway", "<html>upstream down</html>").await;
        let client = LLMClient::new(None, base_url);

        let err = send_chat_completion(&local_http_client(), &client, json!({}))
            .await
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Failed to decode OpenAI response JSON"));
        assert!(message.contains("upstream down"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn connection_failure_is_an_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let client = LLMClient::new(None, base_url);

        let err = send_chat_completion(&local_http_client(), &client, json!({}))
            .await
            .unwrap_err();
        assert!(format!("{err}").contains("/chat/completions failed"));
    }

    fn sample_request() -> ChatRequest {
        ChatRequest {
            model: "gpt-4o".to_string(),
            messages: vec![
                LLMMessage::system("Describe the scene."),
                LLMMessage::new(
                    "user",
                    vec![
                        LLMMessageType::image_b64("AAAA", "image/jpeg"),
                        LLMMessageType::image_b64("BBBB", "image/jpeg"),
                    ],
                ),
            ],
            max_tokens: 40,
            temperature: 0.0,
            seed: 123,
        }
    }

    #[test]
    fn payload_carries_sampling_settings() {
        let payload = build_chat_payload(&sample_request());

        assert_eq!(payload["model"], "gpt-4o");
        assert_eq!(payload["max_tokens"], 40);
        assert_eq!(payload["temperature"], 0.0);
        assert_eq!(payload["seed"], 123);
    }

    #[test]
    fn text_parts_stay_as_content_arrays() {
        let payload = build_chat_payload(&sample_request());
        let system = &payload["messages"][0];

        assert_eq!(system["role"], "system");
        assert_eq!(
            system["content"],
            json!([{ "type": "text", "text": "Describe the scene." }])
        );
    }

    #[test]
    fn images_become_data_urls_in_order() {
        let payload = build_chat_payload(&sample_request());
        let user = &payload["messages"][1];

        assert_eq!(user["role"], "user");
        let parts = user["content"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["type"], "image_url");
        assert_eq!(parts[0]["image_url"]["url"], "data:image/jpeg;base64,AAAA");
        assert_eq!(parts[1]["image_url"]["url"], "data:image/jpeg;base64,BBBB");
    }

    #[test]
    fn payload_key_order_is_stable() {
        let payload = build_chat_payload(&sample_request());
        let keys: Vec<&str> = payload
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["model", "messages", "max_tokens", "temperature", "seed"]);
    }
}
