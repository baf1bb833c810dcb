//! Async batch processing module
//!
//! Concurrent multi-file encode and decode for high-throughput batch jobs.

#[cfg(feature = "async")]
/// Concurrent file processing with a configurable concurrency limit
pub mod processor {
    use crate::{Config, Result};
    use futures::stream::{self, StreamExt, TryStreamExt};
    use std::path::{Path, PathBuf};

    /// Concurrent file codec optimized for throughput.
    #[derive(Debug, Clone)]
    pub struct AsyncBatchProcessor {
        concurrency_limit: usize,
        cfg: Config,
    }

    impl AsyncBatchProcessor {
        /// Create a batch processor; concurrency defaults to the CPU count.
        pub fn new(cfg: Config) -> Self {
            Self {
                concurrency_limit: num_cpus::get(),
                cfg,
            }
        }

        /// Set the number of files processed concurrently.
        pub fn with_concurrency(mut self, limit: usize) -> Self {
            self.concurrency_limit = limit.max(1);
            self
        }

        /// Compress many files concurrently, collecting the results.
        pub async fn encode_files<P: AsRef<Path>>(
            &self,
            files: Vec<P>,
        ) -> Result<Vec<(PathBuf, Vec<u8>)>> {
            let cfg = self.cfg;
            let results: Vec<(PathBuf, Vec<u8>)> = stream::iter(files.into_iter().map(|path| {
                let path = path.as_ref().to_path_buf();
                async move {
                    let data = tokio::fs::read(&path).await?;
                    let packed =
                        crate::async_convenience::functions::encode_bytes_async(data, cfg).await?;
                    Ok::<_, crate::Lz8Error>((path, packed))
                }
            }))
            .buffer_unordered(self.concurrency_limit)
            .try_collect()
            .await?;

            Ok(results)
        }

        /// Decompress many files concurrently, collecting the results.
        pub async fn decode_files<P: AsRef<Path>>(
            &self,
            files: Vec<P>,
        ) -> Result<Vec<(PathBuf, Vec<u8>)>> {
            let cfg = self.cfg;
            let results: Vec<(PathBuf, Vec<u8>)> = stream::iter(files.into_iter().map(|path| {
                let path = path.as_ref().to_path_buf();
                async move {
                    let data = tokio::fs::read(&path).await?;
                    let restored =
                        crate::async_convenience::functions::decode_bytes_async(data, cfg).await?;
                    Ok::<_, crate::Lz8Error>((path, restored))
                }
            }))
            .buffer_unordered(self.concurrency_limit)
            .try_collect()
            .await?;

            Ok(results)
        }
    }

    impl Default for AsyncBatchProcessor {
        fn default() -> Self {
            Self::new(Config::default())
        }
    }
}

#[cfg(feature = "async")]
pub use processor::AsyncBatchProcessor;
