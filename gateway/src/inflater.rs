use flate2::{Decompress, FlushDecompress, Status};

use crate::Result;

// 16 KiB
const CHUNK_SIZE: usize = 16 * 1024;

const ZLIB_SUFFIX: [u8; 4] = [0x00, 0x00, 0xff, 0xff];

/// Inflates a `zlib-stream` transport. A single zlib context spans the whole connection, and a
/// message is only complete once a frame ends with the sync-flush suffix.
pub struct Inflater {
    decompress: Decompress,
    buffer: Vec<u8>,
}

impl Inflater {
    pub fn new() -> Inflater {
        Inflater {
            decompress: Decompress::new(true),
            buffer: Vec::with_capacity(CHUNK_SIZE),
        }
    }

    /// Returns `None` while a message is still split across frames
    pub fn inflate(&mut self, data: &[u8]) -> Result<Option<Vec<u8>>> {
        self.buffer.extend_from_slice(data);

        if !self.buffer.ends_with(&ZLIB_SUFFIX) {
            return Ok(None);
        }

        let before = self.decompress.total_in();
        let mut output: Vec<u8> = Vec::with_capacity(CHUNK_SIZE);
        let mut offset = 0usize;

        loop {
            if output.capacity() - output.len() < CHUNK_SIZE {
                output.reserve(CHUNK_SIZE);
            }

            let status = self.decompress.decompress_vec(
                &self.buffer[offset..],
                &mut output,
                FlushDecompress::Sync,
            );

            let status = match status {
                Ok(status) => status,
                Err(e) => {
                    self.reset();
                    return Err(e.into());
                }
            };

            offset = (self.decompress.total_in() - before) as usize;

            if status == Status::StreamEnd {
                break;
            }

            if offset >= self.buffer.len() && output.len() < output.capacity() {
                break;
            }
        }

        self.buffer.clear();
        Ok(Some(output))
    }

    /// Must be called whenever a new connection is opened
    pub fn reset(&mut self) {
        self.decompress.reset(true);
        self.buffer.clear();
    }
}
