use std::str;

use bytes::Buf;

pub type Result<T, E = BufferError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("buffer too short: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },
    #[error("invalid UTF-8 content encountered")]
    InvalidUtf8(#[from] str::Utf8Error),
}

/// Read cursor over a received message. Every read checks the remaining length first, so
/// corrupted or cut-off data surfaces as [`BufferError::Truncated`] instead of a panic.
#[derive(Debug)]
pub struct Buffer<'a> {
    buffer: &'a [u8],
}

impl<'a> Buffer<'a> {
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.buffer.first().copied()
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if self.buffer.len() < needed {
            return Err(BufferError::Truncated {
                needed,
                remaining: self.buffer.len(),
            });
        }
        Ok(())
    }

    pub fn advance(&mut self, cnt: usize) -> Result<()> {
        self.ensure(cnt)?;
        self.buffer.advance(cnt);
        Ok(())
    }

    /// Split off the next `len` bytes as their own buffer.
    pub fn split_to(&mut self, len: usize) -> Result<Buffer<'a>> {
        self.ensure(len)?;
        let (head, tail) = self.buffer.split_at(len);
        self.buffer = tail;
        Ok(Buffer::new(head))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.buffer.get_u8())
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        Ok(self.buffer.get_u16())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.buffer.get_u32())
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.ensure(8)?;
        Ok(self.buffer.get_u64())
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.ensure(1)?;
        Ok(self.buffer.get_i8())
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.ensure(2)?;
        Ok(self.buffer.get_i16())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.buffer.get_i32())
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.ensure(8)?;
        Ok(self.buffer.get_i64())
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.ensure(4)?;
        Ok(self.buffer.get_f32())
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.ensure(8)?;
        Ok(self.buffer.get_f64())
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        self.ensure(len)?;
        let (head, tail) = self.buffer.split_at(len);
        self.buffer = tail;
        Ok(head)
    }

    pub fn read_str(&mut self, len: usize) -> Result<String> {
        let bytes = self.read_slice(len)?;
        Ok(str::from_utf8(bytes)?.to_owned())
    }

    pub fn read_blob(&mut self, len: usize) -> Result<Vec<u8>> {
        self.read_slice(len).map(<[u8]>::to_vec)
    }
}
