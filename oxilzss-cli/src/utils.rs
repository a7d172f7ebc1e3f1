//! Utility functions for the CLI.

use filetime::FileTime;
use indicatif::{ProgressBar, ProgressStyle};
use std::error::Error;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension used for compressed output.
pub const LZSS_EXTENSION: &str = "lzss";

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░ "));
    }
    pb
}

/// `input.lzss` for `input`.
pub fn compressed_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(LZSS_EXTENSION);
    PathBuf::from(name)
}

/// `input` without its `.lzss` extension, or `input.decompressed`.
pub fn decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == LZSS_EXTENSION) {
        return input.with_extension("");
    }
    let mut name = OsString::from(input.as_os_str());
    name.push(".decompressed");
    PathBuf::from(name)
}

/// Pick the output path for one input and reject a clash with `-o`.
pub fn resolve_output(
    inputs: &[PathBuf],
    explicit: Option<&Path>,
    input: &Path,
    default: fn(&Path) -> PathBuf,
) -> Result<PathBuf, Box<dyn Error>> {
    match explicit {
        Some(_) if inputs.len() > 1 => Err("--output cannot be used with multiple inputs".into()),
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(default(input)),
    }
}

/// Write `data` to `output`, refusing to clobber unless `force` is set.
///
/// The output takes the modification time of `source`.
pub fn write_output(
    output: &Path,
    data: &[u8],
    source: &Path,
    force: bool,
) -> Result<(), Box<dyn Error>> {
    if output.exists() && !force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            output.display()
        )
        .into());
    }

    fs::write(output, data)?;

    let metadata = fs::metadata(source)?;
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(output, mtime)?;

    log::info!("wrote {} ({} bytes)", output.display(), data.len());
    Ok(())
}

/// Compressed size as a percentage of the original.
pub fn ratio_percent(original: usize, compressed: usize) -> f64 {
    if original == 0 {
        0.0
    } else {
        compressed as f64 / original as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_path() {
        assert_eq!(
            compressed_path(Path::new("dir/input.txt")),
            PathBuf::from("dir/input.txt.lzss")
        );
    }

    #[test]
    fn test_decompressed_path() {
        assert_eq!(
            decompressed_path(Path::new("input.txt.lzss")),
            PathBuf::from("input.txt")
        );
        assert_eq!(
            decompressed_path(Path::new("kernelcache")),
            PathBuf::from("kernelcache.decompressed")
        );
        assert_eq!(
            decompressed_path(Path::new("data.lzs")),
            PathBuf::from("data.lzs.decompressed")
        );
    }

    #[test]
    fn test_resolve_output() {
        let one = vec![PathBuf::from("a")];
        let two = vec![PathBuf::from("a"), PathBuf::from("b")];

        let path = resolve_output(&one, None, Path::new("a"), compressed_path).unwrap();
        assert_eq!(path, PathBuf::from("a.lzss"));

        let out = Some(Path::new("out"));
        let path = resolve_output(&one, out, Path::new("a"), compressed_path).unwrap();
        assert_eq!(path, PathBuf::from("out"));

        assert!(resolve_output(&two, out, Path::new("a"), compressed_path).is_err());
    }

    #[test]
    fn test_ratio_percent() {
        assert_eq!(ratio_percent(0, 0), 0.0);
        assert_eq!(ratio_percent(200, 50), 25.0);
    }
}
