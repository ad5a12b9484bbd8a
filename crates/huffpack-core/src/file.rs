//! Whole-file input and output

use std::fs;
use std::path::Path;

use crate::Result;

pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path)?;
    log::debug!("read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

/// Write `bytes` to `path`, removing whatever was written if the write fails
pub(crate) fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Err(err) = fs::write(path, bytes) {
        if path.exists() {
            log::warn!("removing partially written {}", path.display());
            if let Err(remove_err) = fs::remove_file(path) {
                log::warn!("could not remove {}: {remove_err}", path.display());
            }
        }
        return Err(err.into());
    }
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
