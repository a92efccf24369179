use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

/// Case-insensitive suffix every discovered input file must carry.
pub const INPUT_SUFFIX: &str = ".leb36.renumbered";

/// Discovers input sources: every directory entry whose name ends
/// (case-insensitively) in `.leb36.renumbered`, opened in lexicographic
/// basename order; or, if `input` is a single regular file, that file alone.
pub fn discover_inputs(input: &Path) -> CliResult<Vec<PathBuf>> {
    if input.is_dir() {
        let mut found: Vec<PathBuf> = std::fs::read_dir(input)
            .map_err(|e| CliError::InputOpenFailed {
                path: input.to_path_buf(),
                source: e,
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .map(|name| name.to_lowercase().ends_with(INPUT_SUFFIX))
                    .unwrap_or(false)
            })
            .collect();
        found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(found)
    } else if input.is_file() {
        Ok(vec![input.to_path_buf()])
    } else {
        Err(CliError::CannotListInputs {
            path: input.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn discovers_matching_files_in_lexicographic_order() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("b.leb36.renumbered")).unwrap();
        File::create(dir.path().join("a.LEB36.RENUMBERED")).unwrap();
        File::create(dir.path().join("ignore.txt")).unwrap();

        let found = discover_inputs(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.LEB36.RENUMBERED", "b.leb36.renumbered"]);
    }

    #[test]
    fn single_file_input_is_its_own_sole_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("only.leb36.renumbered");
        File::create(&path).unwrap();
        let found = discover_inputs(&path).unwrap();
        assert_eq!(found, vec![path]);
    }

    #[test]
    fn missing_path_cannot_be_listed() {
        let err = discover_inputs(Path::new("/nonexistent/path/xyz")).unwrap_err();
        assert!(matches!(err, CliError::CannotListInputs { .. }));
    }
}
