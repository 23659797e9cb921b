pub mod gemini;
pub mod placeholder;
