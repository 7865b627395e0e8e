use crate::error::{BatchError, Result};
use codeunit_segmenter::CodeUnit;
use std::fs;
use std::path::{Path, PathBuf};

/// Mirror `source` (under `input_root`) into `output_root` with a `.json`
/// extension: `in/lib/a.js` → `out/lib/a.json`.
pub fn output_path_for(input_root: &Path, output_root: &Path, source: &Path) -> Result<PathBuf> {
    let relative = source.strip_prefix(input_root).map_err(|_| {
        BatchError::InvalidPath(format!(
            "{} is not under {}",
            source.display(),
            input_root.display()
        ))
    })?;
    Ok(output_root.join(relative).with_extension("json"))
}

/// Write `units` as a pretty JSON array, creating parent directories
pub fn write_units(path: &Path, units: &[CodeUnit]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(units)?)?;
    Ok(())
}
