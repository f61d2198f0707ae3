//! Core types for the paper assistant

pub mod api;
pub mod mcq;
pub mod paper;

pub use api::{
    ChatbotRequest, ChatbotResponse, McqResponse, MessageResponse, SummaryRequest,
    SummaryResponse, TitlesResponse,
};
pub use mcq::Mcq;
pub use paper::{PaperContent, PaperRecord, RetrievedDocument};
