//! Retrieval collaborator seam for `/api/query`.
//!
//! Real retrieval (vector search over course content) is an external
//! system. The server only depends on the [`Retriever`] trait; production
//! wiring uses [`SimulatedRetriever`], which fabricates plausible results
//! so the personalization pipeline around it can be exercised end to end.

use async_trait::async_trait;
use serde::Serialize;

/// One answer choice in a retrieval response.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalChoice {
    pub message: ChoiceMessage,
    pub index: usize,
    pub finish_reason: String,
}

/// The message payload of a choice.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceMessage {
    pub role: String,
    pub content: String,
}

/// Token accounting reported by the retrieval backend.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalUsage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

/// A retrieval result: answer choices plus usage accounting.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalResponse {
    pub choices: Vec<RetrievalChoice>,
    pub usage: RetrievalUsage,
}

/// Errors from a retrieval backend.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("Retrieval backend unavailable: {0}")]
    Unavailable(String),
}

/// A retrieval backend answering a query with up to `top_k` results.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str, top_k: usize)
        -> Result<RetrievalResponse, RetrievalError>;
}

/// Stand-in retriever: `top_k` mock passages with decreasing relevance
/// scores, summarized into a single assistant choice.
#[derive(Debug, Default)]
pub struct SimulatedRetriever;

#[async_trait]
impl Retriever for SimulatedRetriever {
    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<RetrievalResponse, RetrievalError> {
        let passages: Vec<String> = (1..=top_k)
            .map(|i| {
                format!(
                    "Mock result {i} for query: \"{query}\". \
                     This would be actual content from the RAG system."
                )
            })
            .collect();

        let completion_tokens: usize = passages.iter().map(|p| p.len()).sum();
        let content = format!(
            "Based on your query \"{query}\", here are the results: {}",
            passages.join("; ")
        );

        Ok(RetrievalResponse {
            choices: vec![RetrievalChoice {
                message: ChoiceMessage {
                    role: "assistant".to_string(),
                    content,
                },
                index: 0,
                finish_reason: "stop".to_string(),
            }],
            usage: RetrievalUsage {
                prompt_tokens: query.len(),
                completion_tokens,
                total_tokens: query.len() + completion_tokens,
            },
        })
    }
}
