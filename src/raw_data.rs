use byteorder::{ByteOrder, LittleEndian};

use crate::error::DecodeError;

/// The length prefix a recorder writes when a string argument was a NULL
/// pointer, as opposed to an empty string.
pub const NULL_STRING_SENTINEL: u32 = 0xffff_ffff;

/// A PCM payload that was skipped over rather than copied out: `offset` is
/// the absolute file offset of its first byte, so a consumer can re-open
/// the trace and seek to the audio data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobRef {
    pub offset: u64,
    pub len: u32,
}

/// Little-endian cursor over the full trace file.
///
/// All integers and floats in the log are stored little-endian; reading
/// through `byteorder` keeps the decode bit-exact on big-endian hosts.
/// The cursor position doubles as the absolute file offset, which is what
/// makes [`BlobRef`] offsets and record offsets meaningful.
#[derive(Debug, Clone)]
pub struct RawData<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RawData<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        RawData { data, pos: 0 }
    }

    pub fn position(&self) -> u64 {
        self.pos as u64
    }

    pub fn total_len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        match self.data.len().checked_sub(self.pos) {
            Some(available) if available >= n => {
                let slice = &self.data[self.pos..self.pos + n];
                self.pos += n;
                Ok(slice)
            }
            _ => Err(DecodeError::Truncated {
                at: self.pos as u64,
                wanted: n,
            }),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(LittleEndian::read_u64(self.take(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// A length-prefixed string; `None` if the recorder logged a NULL
    /// pointer. The bytes are nominally ASCII; anything else is replaced
    /// rather than rejected, since a mangled label shouldn't kill the
    /// whole trace.
    pub fn read_string(&mut self) -> Result<Option<String>, DecodeError> {
        let len = self.read_u32()?;
        if len == NULL_STRING_SENTINEL {
            return Ok(None);
        }
        let bytes = self.take(len as usize)?;
        Ok(Some(String::from_utf8_lossy(bytes).into_owned()))
    }

    /// A string whose length was recorded out of band (the header's
    /// application name).
    pub fn read_u8_string(&mut self, len: usize) -> Result<String, DecodeError> {
        Ok(String::from_utf8_lossy(self.take(len)?).into_owned())
    }

    /// Reads the length prefix of a PCM payload and skips the payload
    /// itself, returning where it lives in the file.
    pub fn read_blob(&mut self) -> Result<BlobRef, DecodeError> {
        let len = self.read_u32()?;
        let offset = self.position();
        self.take(len as usize)?;
        Ok(BlobRef { offset, len })
    }

    pub fn read_u32_values(&mut self, count: usize) -> Result<Vec<u32>, DecodeError> {
        let mut values = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            values.push(self.read_u32()?);
        }
        Ok(values)
    }

    pub fn read_i32_values(&mut self, count: usize) -> Result<Vec<i32>, DecodeError> {
        let mut values = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            values.push(self.read_i32()?);
        }
        Ok(values)
    }

    pub fn read_f32_values(&mut self, count: usize) -> Result<Vec<f32>, DecodeError> {
        let mut values = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            values.push(self.read_f32()?);
        }
        Ok(values)
    }

    pub fn read_f64_values(&mut self, count: usize) -> Result<Vec<f64>, DecodeError> {
        let mut values = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            values.push(self.read_f64()?);
        }
        Ok(values)
    }

    pub fn read_bool_values(&mut self, count: usize) -> Result<Vec<bool>, DecodeError> {
        let mut values = Vec::with_capacity(count.min(4096));
        for _ in 0..count {
            values.push(self.read_bool()?);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_little_endian() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let mut r = RawData::new(&bytes);
        assert_eq!(r.read_u16().unwrap(), 0x0201);
        assert_eq!(r.read_u32().unwrap(), 0x06050403);
        assert_eq!(r.position(), 6);
    }

    #[test]
    fn short_read_reports_offset() {
        let mut r = RawData::new(&[0xaa]);
        assert_eq!(r.read_u8().unwrap(), 0xaa);
        match r.read_u32() {
            Err(DecodeError::Truncated { at, wanted }) => {
                assert_eq!(at, 1);
                assert_eq!(wanted, 4);
            }
            other => panic!("expected truncation, got {other:?}"),
        }
    }

    #[test]
    fn null_string_sentinel() {
        let mut bytes = NULL_STRING_SENTINEL.to_le_bytes().to_vec();
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(b"abc");
        let mut r = RawData::new(&bytes);
        assert_eq!(r.read_string().unwrap(), None);
        assert_eq!(r.read_string().unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn blob_records_payload_offset_and_skips() {
        let mut bytes = 4u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[9, 9, 9, 9]);
        bytes.extend_from_slice(&7u32.to_le_bytes());
        let mut r = RawData::new(&bytes);
        let blob = r.read_blob().unwrap();
        assert_eq!(blob.offset, 4);
        assert_eq!(blob.len, 4);
        assert_eq!(r.read_u32().unwrap(), 7);
    }

    #[test]
    fn blob_length_overrunning_file_is_truncation() {
        let bytes = 100u32.to_le_bytes();
        let mut r = RawData::new(&bytes);
        assert!(matches!(
            r.read_blob(),
            Err(DecodeError::Truncated { .. })
        ));
    }
}
