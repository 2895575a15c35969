//! Wire shapes of the collaborators around the visualizers
//!
//! The judge, the game room server and the AI assistant live outside this
//! crate. Only their JSON payloads are modelled here so a front end can decode
//! them and surface failures as status messages; there is no transport.

pub mod assistant;
pub mod game;
pub mod judge;

pub use assistant::{AnalysisRequest, AnalysisResponse, ChatMessage, ChatRequest, ChatResponse};
pub use game::{ClientEvent, ServerEvent};
pub use judge::{RunRequest, TestCaseResult, Verdict};

use crate::engine::errors::VizError;
use serde::de::DeserializeOwned;

/// Decode one collaborator payload
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, VizError> {
    Ok(serde_json::from_str(text)?)
}
