pub mod cpal_recorder;
pub mod interface;
pub mod wav;

pub use cpal_recorder::CpalRecorder;
pub use interface::{AudioError, AudioRecorder};
