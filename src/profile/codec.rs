use std::io::{BufRead, Write};
use std::path::Path;

use memchr::memchr;

use crate::error::{CliError, CliResult};

use super::core::{Profile, ProfilePair};

/// External collaborator: reads/writes one profile-with-reverse-complement
/// per logical record. The merge driver never inspects the on-disk bytes
/// directly; it only calls through this trait.
pub trait ProfileCodec {
    /// Returns the next forward/RC pair, or `None` on clean EOF (or an
    /// unparseable blank line encountered at EOF). Mid-stream corruption is
    /// reported as `CliError::CodecFailure`.
    fn read_pair(&self, reader: &mut dyn BufRead, path: &Path) -> CliResult<Option<ProfilePair>>;

    /// Emits one record in this codec's on-disk form.
    fn write_pair(&self, writer: &mut dyn Write, pair: &ProfilePair) -> CliResult<()>;
}

/// Default line-oriented codec: one line per record,
/// `key fwd_i,fwd_i,... rc_i,rc_i,...` with whitespace-separated fields and
/// comma-separated index lists. Blank lines are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct LebTextCodec;

impl LebTextCodec {
    fn parse_indices(field: &[u8], path: &Path) -> CliResult<Vec<i32>> {
        if field.is_empty() {
            return Ok(Vec::new());
        }
        let text = std::str::from_utf8(field).map_err(|_| CliError::CodecFailure {
            path: path.to_path_buf(),
            message: "non-utf8 index field".to_string(),
        })?;
        text.split(',')
            .map(|tok| {
                tok.trim().parse::<i32>().map_err(|e| CliError::CodecFailure {
                    path: path.to_path_buf(),
                    message: format!("bad index token {tok:?}: {e}"),
                })
            })
            .collect()
    }
}

impl ProfileCodec for LebTextCodec {
    fn read_pair(&self, reader: &mut dyn BufRead, path: &Path) -> CliResult<Option<ProfilePair>> {
        loop {
            let mut line = Vec::new();
            let n = reader.read_until(b'\n', &mut line)?;
            if n == 0 {
                return Ok(None);
            }
            if line.last() == Some(&b'\n') {
                line.pop();
            }
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if line.is_empty() {
                continue;
            }

            let first_space = memchr(b' ', &line).ok_or_else(|| CliError::CodecFailure {
                path: path.to_path_buf(),
                message: "missing key field".to_string(),
            })?;
            let rest = &line[first_space + 1..];
            let second_space = memchr(b' ', rest).ok_or_else(|| CliError::CodecFailure {
                path: path.to_path_buf(),
                message: "missing reverse-complement field".to_string(),
            })?;

            let key_text = std::str::from_utf8(&line[..first_space]).map_err(|_| {
                CliError::CodecFailure {
                    path: path.to_path_buf(),
                    message: "non-utf8 key field".to_string(),
                }
            })?;
            let key: i64 = key_text.parse().map_err(|_| CliError::CodecFailure {
                path: path.to_path_buf(),
                message: format!("bad key field {key_text:?}"),
            })?;

            let fwd_field = &rest[..second_space];
            let rc_field = &rest[second_space + 1..];

            let fwd_indices = Self::parse_indices(fwd_field, path)?;
            let rc_indices = Self::parse_indices(rc_field, path)?;

            return Ok(Some(ProfilePair {
                forward: Profile::new(key, fwd_indices),
                reverse_complement: Profile::new(key, rc_indices),
            }));
        }
    }

    fn write_pair(&self, writer: &mut dyn Write, pair: &ProfilePair) -> CliResult<()> {
        let fwd_csv = pair
            .forward
            .indices
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let rc_csv = pair
            .reverse_complement
            .indices
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{} {} {}", pair.key(), fwd_csv, rc_csv)?;
        Ok(())
    }
}
