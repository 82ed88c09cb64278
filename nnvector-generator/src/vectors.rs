use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use nnvector::{CaseSerialize, DeclarationWriter, TestCase};

/// Output directory for generated vectors.
///
/// `NNVECTOR_VECTOR_DIR` wins; otherwise `target/vectors` under the
/// workspace root.
pub fn vector_dir() -> PathBuf {
    if let Ok(dir) = env::var("NNVECTOR_VECTOR_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .join("target")
        .join("vectors")
}

/// Write `<name>.json` and `<name>.mod` for `case` into `dir`.
pub fn write_case(dir: &Path, case: &TestCase) -> Result<Vec<PathBuf>> {
    case.validate()?;
    fs::create_dir_all(dir)
        .map_err(|err| anyhow!("failed to create {}: {}", dir.display(), err))?;
    let json_path = dir.join(format!("{}.json", case.name()));
    let mod_path = dir.join(format!("{}.mod", case.name()));
    write_file(&json_path, &CaseSerialize::pretty(case)?)?;
    write_file(&mod_path, &DeclarationWriter::write(case)?)?;
    Ok(vec![json_path, mod_path])
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|err| anyhow!("failed to write {}: {}", path.display(), err))
}
