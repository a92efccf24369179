use std::cmp::Ordering;
use std::path::PathBuf;

use crate::canon::compare_indices;
use crate::discover::discover_inputs;
use crate::error::{CliError, CliResult};
use crate::heap::MergeHeap;
use crate::limits::raise_descriptor_limit;
use crate::output::OutputWriter;
use crate::profile::{CanonicalKey, LebTextCodec, ProfileCodec, ProfilePair};
use crate::report::Reporter;
use crate::source::Source;

/// Runtime configuration for one merge run.
pub struct MergeConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub identical_only: bool,
    pub single_file: bool,
    pub verbose: bool,
}

/// Final accounting reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub n_read: u64,
    pub n_written: u64,
}

/// Runs the merge/dedup driver with the default LEB36 text codec.
pub fn run(config: &MergeConfig) -> CliResult<MergeStats> {
    run_with_codec(config, &LebTextCodec)
}

/// Runs the merge/dedup driver against an arbitrary codec, so tests and
/// benchmarks can exercise the driver without going through the on-disk
/// default format.
pub fn run_with_codec(config: &MergeConfig, codec: &dyn ProfileCodec) -> CliResult<MergeStats> {
    let reporter = Reporter::new(config.verbose);

    let paths = discover_inputs(&config.input)?;
    if paths.is_empty() {
        return Err(CliError::CannotListInputs {
            path: config.input.clone(),
        });
    }
    raise_descriptor_limit(paths.len() as u64)?;
    reporter.note(&format!("there were {} files opened.", paths.len()));

    let mut sources: Vec<Source> = Vec::with_capacity(paths.len());
    for path in &paths {
        sources.push(Source::open(path)?);
    }

    let mut heap = MergeHeap::new();
    for (idx, source) in sources.iter_mut().enumerate() {
        source.refill(codec)?;
        source.advance(codec, config.identical_only)?;
        if source.never_produced_a_record() {
            return Err(CliError::EmptyInput {
                path: source.path().to_path_buf(),
            });
        }
        if let Some(key) = source.current_key() {
            heap.push(idx, key.clone());
        }
    }

    let mut output = open_output(config)?;

    let mut last_write: Option<(ProfilePair, CanonicalKey)> = None;
    let mut n_read: u64 = 0;
    let mut n_written: u64 = 0;

    while let Some(idx) = heap.pop() {
        n_read += 1;
        let (pair, key) = sources[idx]
            .current()
            .expect("an entry popped from the heap always has a current record")
            .clone();

        let is_dup = is_duplicate(last_write.as_ref(), &pair, &key);

        if is_dup {
            output.write_duplicate(codec, &pair, &key)?;
        } else {
            n_written += 1;
            output.write_preserved(codec, &pair, &key)?;
            last_write = Some((pair, key));
            output.maybe_roll(n_written)?;
        }

        sources[idx].advance(codec, config.identical_only)?;
        if let Some(new_key) = sources[idx].current_key() {
            heap.push(idx, new_key.clone());
        }
    }

    output.finish()?;
    reporter.summary(n_read, n_written);
    Ok(MergeStats { n_read, n_written })
}

/// Two records are duplicates iff their canonical keys match AND either
/// their forward/reverse index arrays pairwise match or they are swapped
/// (one record's forward equals the other's reverse-complement and vice
/// versa). Canonical-key equality alone is not sufficient: independent
/// inputs can normalize to the same key while disagreeing on which strand
/// is "forward".
fn is_duplicate(
    last_write: Option<&(ProfilePair, CanonicalKey)>,
    top: &ProfilePair,
    top_key: &CanonicalKey,
) -> bool {
    let Some((lw_pair, lw_key)) = last_write else {
        return false;
    };
    if compare_indices(&lw_key.rep, &top_key.rep) != Ordering::Equal {
        return false;
    }
    let aligned = top.forward.indices == lw_pair.forward.indices
        && top.reverse_complement.indices == lw_pair.reverse_complement.indices;
    let crossed = top.forward.indices == lw_pair.reverse_complement.indices
        && top.reverse_complement.indices == lw_pair.forward.indices;
    aligned || crossed
}

fn open_output(config: &MergeConfig) -> CliResult<OutputWriter> {
    if config.single_file {
        OutputWriter::new_single_file(config.output.clone())
    } else {
        let outdir = config
            .output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        let outbase = config
            .output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or(CliError::BadArguments)?;
        OutputWriter::new_segmented(outdir, outbase)
    }
}
