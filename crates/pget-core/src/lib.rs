pub mod config;
pub mod logging;

pub mod downloader;
pub mod error;
pub mod negotiate;
pub mod probe;
pub mod segmenter;
pub mod stream;

pub use downloader::{FetchOptions, ParallelGetReader};
pub use error::FetchError;
pub use stream::ValidatingRead;
