use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Size of each write to the destination
pub const CHUNK_SIZE: usize = 1024;

/// Outcome of a chunked copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub bytes: u64,
    pub writes: u64,
}

/// Copy `reader` into `writer` in chunks of at most [`CHUNK_SIZE`] bytes
///
/// Every chunk except the last is exactly full, regardless of how the source
/// frames its data, so `N` bytes always produce `ceil(N / CHUNK_SIZE)` writes.
/// The writer is flushed once the source is drained. When `limit` is set,
/// the copy stops with an error as soon as the total would exceed it. On any
/// error, bytes already received stay in the destination, including a
/// partly filled chunk when the source fails.
pub async fn copy_chunked<R, W>(reader: &mut R, writer: &mut W, limit: Option<u64>) -> io::Result<CopyStats>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut stats = CopyStats::default();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let (filled, read) = fill_chunk(reader, &mut buf).await;

        if filled > 0 {
            let total = stats.bytes + filled as u64;
            if let Some(limit) = limit.filter(|limit| total > *limit) {
                return Err(io::Error::other(format!("audio exceeds the {limit} byte limit")));
            }

            writer.write_all(&buf[..filled]).await?;
            stats.bytes = total;
            stats.writes += 1;
        }

        read?;

        if filled < CHUNK_SIZE {
            break;
        }
    }

    writer.flush().await?;
    Ok(stats)
}

/// Read until `buf` is full or the source ends
///
/// Returns how much was read alongside the read error, if any, so a failing
/// source does not lose the bytes it delivered before failing.
async fn fill_chunk<R>(reader: &mut R, buf: &mut [u8]) -> (usize, io::Result<()>)
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) => return (filled, Err(e)),
        }
    }

    (filled, Ok(()))
}
