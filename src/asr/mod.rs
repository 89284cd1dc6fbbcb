pub mod factory;
pub mod google_asr;
pub mod interface;
pub mod python_asr;

pub use factory::{ASRComponents, ASRFactory};
pub use interface::{transcribe_or_empty, ASRInterface, AsrError};
