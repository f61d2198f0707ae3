//! Helpers shared by integration tests

mod pdf;

pub use pdf::sample_pdf;
