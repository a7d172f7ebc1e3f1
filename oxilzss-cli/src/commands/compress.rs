//! Compress command implementation.

use crate::utils::{
    compressed_path, create_progress_bar, ratio_percent, resolve_output, write_output,
};
use oxilzss_archive::{ContainerOptions, pack};
use oxilzss_codec::compress;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for the compress command.
pub struct CompressOptions {
    /// Explicit output path.
    pub output: Option<PathBuf>,
    /// Wrap output in a complzss header.
    pub container: bool,
    /// Checksum to record in the header.
    pub checksum: u32,
    /// Overwrite existing outputs.
    pub force: bool,
}

pub fn cmd_compress(
    files: &[PathBuf],
    options: &CompressOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_progress_bar(files.len() as u64, files.len() > 1);

    for input in files {
        pb.set_message(input.display().to_string());
        let output = resolve_output(files, options.output.as_deref(), input, compressed_path)?;
        compress_file(input, &output, options, &pb)?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(())
}

fn compress_file(
    input: &Path,
    output: &Path,
    options: &CompressOptions,
    pb: &indicatif::ProgressBar,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;

    let result = if options.container {
        pack(
            &data,
            ContainerOptions {
                checksum: options.checksum,
            },
        )?
    } else {
        compress(&data)
    };

    write_output(output, &result, input, options.force)?;

    pb.suspend(|| {
        println!(
            "Compressed {} bytes to {} bytes ({:.2}% ratio)",
            data.len(),
            result.len(),
            ratio_percent(data.len(), result.len())
        );
        println!("Output written to: {}", output.display());
    });
    Ok(())
}
