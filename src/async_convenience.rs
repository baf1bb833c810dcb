//! Async convenience functions
//!
//! High-level async entry points for common encode and decode operations.
//! The parser is CPU-bound and needs the whole buffer, so the codec itself
//! runs on the blocking thread pool while file I/O stays async.

#[cfg(feature = "async")]
/// Easy-to-use async wrappers around the in-memory codec
pub mod functions {
    use crate::{Config, Lz8Error, Result};
    use std::path::Path;
    use tokio::io::{AsyncRead, AsyncReadExt};

    fn join_error(e: tokio::task::JoinError) -> Lz8Error {
        Lz8Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Compress a buffer on the blocking thread pool.
    pub async fn encode_bytes_async(data: Vec<u8>, cfg: Config) -> Result<Vec<u8>> {
        tokio::task::spawn_blocking(move || crate::encode_bytes(&data, &cfg))
            .await
            .map_err(join_error)?
    }

    /// Decompress a buffer on the blocking thread pool.
    pub async fn decode_bytes_async(data: Vec<u8>, cfg: Config) -> Result<Vec<u8>> {
        tokio::task::spawn_blocking(move || crate::decode_bytes(&data, &cfg))
            .await
            .map_err(join_error)?
    }

    /// Compress everything from an async reader.
    pub async fn encode_reader<R: AsyncRead + Unpin>(mut reader: R, cfg: Config) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        encode_bytes_async(data, cfg).await
    }

    /// Decompress everything from an async reader.
    pub async fn decode_reader<R: AsyncRead + Unpin>(mut reader: R, cfg: Config) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        decode_bytes_async(data, cfg).await
    }

    /// Compress one file into another; returns the compressed size.
    pub async fn encode_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_path: P1,
        output_path: P2,
        cfg: Config,
    ) -> Result<u64> {
        let data = tokio::fs::read(input_path).await?;
        let packed = encode_bytes_async(data, cfg).await?;
        let size = packed.len() as u64;
        tokio::fs::write(output_path, packed).await?;
        Ok(size)
    }

    /// Decompress one file into another; returns the decompressed size.
    pub async fn decode_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_path: P1,
        output_path: P2,
        cfg: Config,
    ) -> Result<u64> {
        let data = tokio::fs::read(input_path).await?;
        let restored = decode_bytes_async(data, cfg).await?;
        let size = restored.len() as u64;
        tokio::fs::write(output_path, restored).await?;
        Ok(size)
    }
}

#[cfg(feature = "async")]
pub use functions::*;
