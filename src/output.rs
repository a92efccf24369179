use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};
use crate::profile::{CanonicalKey, ProfileCodec, ProfilePair};

/// Preserved records per output segment in multi-file mode.
pub const RECORDS_PER_SEGMENT: u64 = 100_000;

fn open_for_write(path: &Path) -> CliResult<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| CliError::OutputOpenFailed {
            path: path.to_path_buf(),
            source: e,
        })
}

fn index_path_for(data_path: &Path) -> PathBuf {
    let mut s = data_path.as_os_str().to_owned();
    s.push(".rotindex");
    PathBuf::from(s)
}

/// Either the single path given on the command line (single-file mode), or
/// `{outdir}/{n}.{outbase}` for `n = 1, 2, ...` (segmented mode).
enum OutputNaming {
    Single(PathBuf),
    Segmented { outdir: PathBuf, outbase: String },
}

impl OutputNaming {
    fn data_path(&self, segment_number: u32) -> PathBuf {
        match self {
            OutputNaming::Single(path) => path.clone(),
            OutputNaming::Segmented { outdir, outbase } => {
                outdir.join(format!("{segment_number}.{outbase}"))
            }
        }
    }
}

/// The merge output: current data stream, current index stream, and segment
/// bookkeeping. Rolls to a fresh segment every `RECORDS_PER_SEGMENT`
/// preserved records unless single-file mode disables rolling.
pub struct OutputWriter {
    naming: OutputNaming,
    single_file: bool,
    segment_number: u32,
    data: BufWriter<File>,
    index: BufWriter<File>,
    wrote_any_group: bool,
}

impl OutputWriter {
    pub fn new_single_file(path: PathBuf) -> CliResult<Self> {
        Self::open(OutputNaming::Single(path), true)
    }

    pub fn new_segmented(outdir: PathBuf, outbase: String) -> CliResult<Self> {
        Self::open(OutputNaming::Segmented { outdir, outbase }, false)
    }

    fn open(naming: OutputNaming, single_file: bool) -> CliResult<Self> {
        let segment_number = 1;
        let data_path = naming.data_path(segment_number);
        let data = open_for_write(&data_path)?;
        let index = open_for_write(&index_path_for(&data_path))?;
        Ok(OutputWriter {
            naming,
            single_file,
            segment_number,
            data,
            index,
            wrote_any_group: false,
        })
    }

    pub fn current_data_path(&self) -> PathBuf {
        self.naming.data_path(self.segment_number)
    }

    /// Writes a newly preserved record: starts a new index group (closing
    /// the previous one with a newline, unless this is the first group of
    /// the current segment) and emits the record to the data stream.
    pub fn write_preserved(
        &mut self,
        codec: &dyn ProfileCodec,
        pair: &ProfilePair,
        key: &CanonicalKey,
    ) -> CliResult<()> {
        if self.wrote_any_group {
            writeln!(self.index)?;
        }
        write!(self.index, "{}{}", key_digits(pair), key.mark())?;
        self.wrote_any_group = true;
        codec.write_pair(&mut self.data, pair)
    }

    /// Writes a duplicate's index token (space-prefixed, no new group) and
    /// its full record to the data stream. The downstream consumer expects
    /// every profile present in the data file, duplicates included.
    pub fn write_duplicate(
        &mut self,
        codec: &dyn ProfileCodec,
        pair: &ProfilePair,
        key: &CanonicalKey,
    ) -> CliResult<()> {
        write!(self.index, " {}{}", key_digits(pair), key.mark())?;
        codec.write_pair(&mut self.data, pair)
    }

    /// Rolls to the next segment if `nwritten` just crossed a segment
    /// boundary and segment rolling is enabled.
    pub fn maybe_roll(&mut self, nwritten: u64) -> CliResult<()> {
        if self.single_file || nwritten % RECORDS_PER_SEGMENT != 0 {
            return Ok(());
        }
        self.data.flush()?;
        self.index.flush()?;
        self.segment_number += 1;
        let data_path = self.naming.data_path(self.segment_number);
        self.data = open_for_write(&data_path)?;
        self.index = open_for_write(&index_path_for(&data_path))?;
        self.wrote_any_group = false;
        Ok(())
    }

    pub fn finish(mut self) -> CliResult<()> {
        self.data.flush()?;
        self.index.flush()?;
        Ok(())
    }
}

fn key_digits(pair: &ProfilePair) -> i64 {
    pair.key()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{LebTextCodec, Profile};
    use std::io::Read;
    use tempfile::tempdir;

    fn sample(key: i64) -> (ProfilePair, CanonicalKey) {
        let pair = ProfilePair {
            forward: Profile::new(key, vec![1, 2]),
            reverse_complement: Profile::new(key, vec![3, 4]),
        };
        let k = CanonicalKey {
            rep: vec![1, 2],
            rc_wins: false,
        };
        (pair, k)
    }

    #[test]
    fn single_file_mode_never_rolls() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.leb36");
        let mut w = OutputWriter::new_single_file(path.clone()).unwrap();
        let codec = LebTextCodec;
        let (p1, k1) = sample(1);
        w.write_preserved(&codec, &p1, &k1).unwrap();
        w.maybe_roll(RECORDS_PER_SEGMENT).unwrap();
        assert_eq!(w.current_data_path(), path);
        w.finish().unwrap();
    }

    #[test]
    fn index_groups_separated_by_newline_with_no_trailing_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.leb36");
        let mut w = OutputWriter::new_single_file(path.clone()).unwrap();
        let codec = LebTextCodec;
        let (p1, k1) = sample(1);
        let (p2, k2) = sample(2);
        w.write_preserved(&codec, &p1, &k1).unwrap();
        w.write_duplicate(&codec, &p2, &k2).unwrap();
        let (p3, k3) = sample(3);
        w.write_preserved(&codec, &p3, &k3).unwrap();
        w.finish().unwrap();

        let mut content = String::new();
        File::open(index_path_for(&path))
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "1' 2'\n3'");
    }

    #[test]
    fn segmented_mode_rolls_at_boundary() {
        let dir = tempdir().unwrap();
        let mut w =
            OutputWriter::new_segmented(dir.path().to_path_buf(), "out.leb36".to_string())
                .unwrap();
        let codec = LebTextCodec;
        let (p1, k1) = sample(1);
        w.write_preserved(&codec, &p1, &k1).unwrap();
        assert_eq!(w.current_data_path(), dir.path().join("1.out.leb36"));
        w.maybe_roll(RECORDS_PER_SEGMENT).unwrap();
        assert_eq!(w.current_data_path(), dir.path().join("2.out.leb36"));
    }
}
