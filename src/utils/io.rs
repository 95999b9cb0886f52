use bytes::Bytes;
use futures::Stream;
use futures::TryStreamExt;
use std::io;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio_util::io::StreamReader;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Drains `stream` into `file`, returning the number of bytes written. Errors
/// yielded by the stream are wrapped into `io::Error` with the original error
/// kept as its inner value.
pub async fn stream_to_file<S, E>(file: tokio::fs::File, stream: S) -> io::Result<u64>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    // Convert the stream into an AsyncRead.
    let body_with_io_error = stream.map_err(io::Error::other);
    let body_reader = StreamReader::new(body_with_io_error);
    futures::pin_mut!(body_reader);

    let mut file = BufWriter::new(file);

    // Copy the body into the file.
    let written = tokio::io::copy(&mut body_reader, &mut file).await?;
    file.flush().await?;

    Ok(written)
}
