//! Serialization of the final encoding
//!
//! Applied once, after merging. Formats:
//!
//! - `text`: each token as its raw symbol byte followed by the decimal count,
//!   concatenated without delimiters (`aaab` becomes `a3b1`)
//! - `binary`: per token, `[symbol: u8][count: u64 LE]`
//! - `json`: `[{"symbol": 97, "count": 3}, ...]`

use crate::config::OutputFormat;
use crate::error::Result;
use crate::token::Token;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

/// Write `tokens` to `writer`, returning the number of bytes written.
pub fn write_tokens<W: Write>(writer: &mut W, tokens: &[Token], format: OutputFormat) -> Result<u64> {
    let mut counted = CountingWriter::new(writer);

    match format {
        OutputFormat::Text => write_text(&mut counted, tokens)?,
        OutputFormat::Binary => write_binary(&mut counted, tokens)?,
        OutputFormat::Json => serde_json::to_writer(&mut counted, tokens)?,
    }
    counted.flush()?;

    Ok(counted.written)
}

/// Serialize `tokens` into a fresh buffer.
pub fn to_bytes(tokens: &[Token], format: OutputFormat) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    write_tokens(&mut output, tokens, format)?;
    Ok(output)
}

fn write_text<W: Write>(writer: &mut W, tokens: &[Token]) -> Result<()> {
    for token in tokens {
        writer.write_all(&[token.symbol])?;
        write!(writer, "{}", token.count)?;
    }
    Ok(())
}

fn write_binary<W: Write>(writer: &mut W, tokens: &[Token]) -> Result<()> {
    for token in tokens {
        writer.write_u8(token.symbol)?;
        writer.write_u64::<LittleEndian>(token.count as u64)?;
    }
    Ok(())
}

struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
