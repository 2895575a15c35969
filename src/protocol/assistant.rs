//! AI assistant API: `/ai/chat`, `/ai/help` and `/ai/analysis`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Body of `/ai/chat` and `/ai/help`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_context: Option<String>,
}

impl ChatRequest {
    pub fn new(question: impl Into<String>) -> Self {
        ChatRequest {
            question: question.into(),
            history: Vec::new(),
            problem_context: None,
        }
    }

    /// Append the exchange so the next request carries it as history
    pub fn record_answer(&mut self, response: &ChatResponse) {
        let question = std::mem::take(&mut self.question);
        self.history.push(ChatMessage {
            role: Role::User,
            content: question,
        });
        self.history.push(ChatMessage {
            role: Role::Assistant,
            content: response.response.clone(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::decode;

    #[test]
    fn test_chat_history_accumulates() {
        let mut request = ChatRequest::new("What is a heap?");
        let response: ChatResponse = decode(r#"{"response": "A tree with an order."}"#).unwrap();
        request.record_answer(&response);

        assert!(request.question.is_empty());
        assert_eq!(request.history.len(), 2);
        assert_eq!(request.history[0].role, Role::User);
        assert_eq!(request.history[1].content, "A tree with an order.");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["history"][1]["role"], "assistant");
        assert!(json.get("problemContext").is_none());
    }

    #[test]
    fn test_decode_analysis() {
        let analysis: AnalysisResponse = decode(r#"{"analysis": "O(n log n)"}"#).unwrap();
        assert_eq!(analysis.analysis, "O(n log n)");
    }
}
