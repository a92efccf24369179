use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::canon::canonicalize;
use crate::error::{CliError, CliResult};
use crate::profile::{CanonicalKey, ProfileCodec, ProfilePair};

/// Per-source lookahead buffer size.
pub const BUFFER_CAPACITY: usize = 1000;

/// One input file: its stream, its bounded read-ahead buffer, and its
/// current front record (if any). A source with no current record is
/// drained.
pub struct Source {
    pub display_name: String,
    path: PathBuf,
    reader: Option<Box<dyn BufRead + Send>>,
    buffer: Vec<ProfilePair>,
    buffer_index: usize,
    buffer_count: usize,
    current: Option<(ProfilePair, CanonicalKey)>,
}

impl Source {
    pub fn open(path: &Path) -> CliResult<Source> {
        let file = File::open(path).map_err(|e| CliError::InputOpenFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Ok(Source {
            display_name,
            path: path.to_path_buf(),
            reader: Some(Box::new(BufReader::new(file))),
            buffer: Vec::new(),
            buffer_index: 0,
            buffer_count: 0,
            current: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Refills the buffer from the underlying stream. Precondition: the
    /// buffer is fully consumed (`buffer_index == buffer_count`). Once the
    /// stream yields zero records, it is closed and the source is drained
    /// for good; a source closed once is never reopened.
    pub fn refill(&mut self, codec: &dyn ProfileCodec) -> CliResult<()> {
        debug_assert_eq!(self.buffer_index, self.buffer_count);
        self.buffer.clear();
        self.buffer_index = 0;
        if let Some(reader) = self.reader.as_mut() {
            while self.buffer.len() < BUFFER_CAPACITY {
                match codec.read_pair(reader, &self.path)? {
                    Some(pair) => self.buffer.push(pair),
                    None => break,
                }
            }
        }
        self.buffer_count = self.buffer.len();
        if self.buffer_count == 0 {
            self.reader = None;
        }
        Ok(())
    }

    /// Advances to the next record, refilling if needed. If the source is
    /// now drained, `current()` becomes `None`.
    pub fn advance(&mut self, codec: &dyn ProfileCodec, identical_only: bool) -> CliResult<()> {
        if self.buffer_index == self.buffer_count {
            self.refill(codec)?;
            if self.buffer_count == 0 {
                self.current = None;
                return Ok(());
            }
        }
        let pair = self.buffer[self.buffer_index].clone();
        self.buffer_index += 1;
        let key = canonicalize(&pair, identical_only);
        self.current = Some((pair, key));
        Ok(())
    }

    pub fn current(&self) -> Option<&(ProfilePair, CanonicalKey)> {
        self.current.as_ref()
    }

    pub fn current_key(&self) -> Option<&CanonicalKey> {
        self.current.as_ref().map(|(_, key)| key)
    }

    pub fn is_drained(&self) -> bool {
        self.current.is_none()
    }

    /// True once a refill has been attempted at least once and produced
    /// zero records while the source had never served a record before.
    pub fn never_produced_a_record(&self) -> bool {
        self.buffer_count == 0 && self.current.is_none()
    }
}
