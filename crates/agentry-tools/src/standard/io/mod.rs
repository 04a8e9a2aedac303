pub mod file;

pub use file::{FILE_PROCESSOR, FileOperation, FileProcessorTool};
