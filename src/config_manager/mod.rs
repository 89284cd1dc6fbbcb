pub mod asr;
pub mod audio;
pub mod catalog;
pub mod genre;
pub mod main;
pub mod system;
pub mod utils;

pub use main::Config;
