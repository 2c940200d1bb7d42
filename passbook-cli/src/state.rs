use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

pub fn passbook_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".passbook"))
}

pub fn ensure_passbook_home() -> Result<PathBuf> {
    let dir = passbook_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Read extracted statement text from `path`, or stdin when `path` is `-`.
/// Inputs larger than `max_bytes` are rejected before parsing.
pub fn read_input(path: &Path, max_bytes: u64) -> Result<String> {
    let limit = max_bytes.saturating_add(1);
    let mut buf = Vec::new();
    if path.as_os_str() == "-" {
        std::io::stdin()
            .lock()
            .take(limit)
            .read_to_end(&mut buf)
            .context("read stdin")?;
    } else {
        let file = fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
        file.take(limit)
            .read_to_end(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
    }

    if buf.len() as u64 > max_bytes {
        anyhow::bail!("input exceeds {max_bytes} bytes: {}", path.display());
    }

    String::from_utf8(buf).with_context(|| format!("{} is not valid UTF-8", path.display()))
}
