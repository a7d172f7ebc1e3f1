//! Decompress command implementation.

use crate::utils::{create_progress_bar, decompressed_path, resolve_output, write_output};
use oxilzss_archive::{ComplzssReader, ContainerFormat};
use oxilzss_codec::decompress;
use std::fs;
use std::path::{Path, PathBuf};

pub fn cmd_decompress(
    files: &[PathBuf],
    output: Option<&Path>,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_progress_bar(files.len() as u64, files.len() > 1);

    for input in files {
        pb.set_message(input.display().to_string());
        let target = resolve_output(files, output, input, decompressed_path)?;

        let data = fs::read(input)?;
        let format = ContainerFormat::detect(&data);
        log::info!("{}: {}", input.display(), format);

        let result = match format {
            ContainerFormat::Complzss { offset } => {
                ComplzssReader::new(&data[offset..])?.decompress()?
            }
            ContainerFormat::Raw => decompress(&data),
        };

        write_output(&target, &result, input, force)?;

        pb.suspend(|| {
            println!(
                "Decompressed {} bytes to {} bytes",
                data.len(),
                result.len()
            );
            println!("Output written to: {}", target.display());
        });
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(())
}
