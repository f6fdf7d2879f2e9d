use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use rayon::prelude::*;

use rollsum::{checksum, RollingAdler32, RollingChecksum};

const READ_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Parser, Debug)]
#[clap(version, about)]
/// Adler-32 checksums of whole files or of a window sliding over a file
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Prints the Adler-32 checksum of each of <FILES>
    Checksum {
        #[clap(required = true, value_parser)]
        /// The files to checksum
        files: Vec<PathBuf>,
    },
    /// Slides a window of --window-size=<WINDOW_SIZE> bytes over <FILE> and prints its Adler-32 checksum
    Roll {
        #[clap(long, value_parser)]
        /// The number of trailing bytes the checksum covers
        window_size: u32,
        #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
        /// Also print the offset and checksum after every <STEP> bytes
        step: Option<u64>,
        #[clap(value_parser)]
        /// The file to roll over
        file: PathBuf,
    },
}

/// Feeds `input` through a rolling checksum, reporting to `out` every `step` bytes and once at
/// the end. Returns the final checksum.
fn roll_stream<R: Read, W: Write>(
    input: &mut R,
    out: &mut W,
    window_size: u32,
    step: Option<u64>,
) -> anyhow::Result<u32> {
    let mut rolling = RollingAdler32::new(window_size)?;

    let step = match step {
        None => {
            let consumed = rolling.roll_reader(input)?;
            debug!("rolled over {} bytes", consumed);
            writeln!(out, "{:08x}", rolling.checksum())?;
            return Ok(rolling.checksum());
        }
        Some(step) => step,
    };

    let mut buffer = vec![0; READ_BUFFER_SIZE];
    let mut consumed: u64 = 0;
    loop {
        let read_bytes = match input.read(&mut buffer) {
            Ok(0) => break,
            Ok(read_bytes) => read_bytes,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for &byte in &buffer[..read_bytes] {
            rolling.roll_byte(byte);
            consumed += 1;
            if consumed % step == 0 {
                writeln!(out, "{} {:08x}", consumed, rolling.checksum())?;
            }
        }
    }
    if consumed % step != 0 {
        writeln!(out, "{} {:08x}", consumed, rolling.checksum())?;
    }
    debug!("rolled over {} bytes", consumed);

    Ok(rolling.checksum())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli: Cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Checksum { files } => {
            info!("Checksumming {} file(s)", files.len());

            let checksums = files
                .par_iter()
                .map(|path| -> anyhow::Result<u32> {
                    let content = fs::read(path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    Ok(checksum(&content))
                })
                .collect::<anyhow::Result<Vec<u32>>>()?;

            for (path, sum) in files.iter().zip(checksums) {
                writeln!(out, "{:08x}  {}", sum, path.display())?;
            }
        }
        Commands::Roll {
            window_size,
            step,
            file,
        } => {
            info!("Rolling a {} byte window over {}", window_size, file.display());

            let input =
                File::open(&file).with_context(|| format!("failed to open {}", file.display()))?;
            roll_stream(&mut BufReader::new(input), &mut out, window_size, step)
                .with_context(|| format!("failed to roll over {}", file.display()))?;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_zero_step_is_rejected() {
        let parsed = Cli::try_parse_from(["rollsum", "roll", "--window-size", "4", "--step", "0", "f"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_roll_stream_prints_the_final_checksum() {
        let mut out = Vec::new();
        let checksum = roll_stream(&mut &b"Wikipedia"[..], &mut out, 32, None).unwrap();

        assert_eq!(checksum, 0x11E6_0398);
        assert_eq!(String::from_utf8(out).unwrap(), "11e60398\n");
    }

    #[test_case(3, "3 0245012c\n6 0281013a\n9 0262012f\n"; "when the input is a multiple of the step")]
    #[test_case(4, "4 027d013e\n8 02630133\n9 0262012f\n"; "when a partial step remains")]
    fn test_roll_stream_with_step(step: u64, expected: &str) {
        let mut out = Vec::new();
        roll_stream(&mut &b"Wikipedia"[..], &mut out, 3, Some(step)).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_roll_stream_rejects_an_empty_window() {
        let mut out = Vec::new();
        let err = roll_stream(&mut &b"Wikipedia"[..], &mut out, 0, None).unwrap_err();

        assert_eq!(
            err.downcast_ref::<rollsum::Error>(),
            Some(&rollsum::Error::InvalidConfiguration { window_size: 0 })
        );
        assert!(out.is_empty());
    }
}
