//! The `aversa process` command: run the filter over one or more images.

use std::path::{Path, PathBuf};

use clap::Args;

use aversa_core::pipeline::to_data_url;
use aversa_core::{Config, FilterPipeline, FilterRecord, OutputFormat, RecordWriter};

/// Arguments for the `process` command.
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Image files to process
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory for processed images (default: alongside each input)
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Skip writing processed images to disk (records only)
    #[arg(long)]
    pub no_write: bool,

    /// Record format: json or jsonl
    #[arg(long)]
    pub format: Option<String>,

    /// Pretty-print JSON records
    #[arg(long)]
    pub pretty: bool,

    /// Embed each processed image as a base64 data URL in its record
    #[arg(long)]
    pub data_url: bool,

    /// Longest edge of the processed image in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(3..))]
    pub max_dimension: Option<u32>,

    /// JPEG quality for the processed image
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,
}

/// What to do with each successful result.
struct BatchOptions<'a> {
    output_dir: Option<&'a Path>,
    no_write: bool,
    include_data_url: bool,
}

/// Execute the process command.
pub async fn execute(args: ProcessArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(max_dimension) = args.max_dimension {
        config.processing.max_dimension = max_dimension;
    }
    if let Some(quality) = args.quality {
        config.processing.jpeg_quality = quality;
    }
    let format = match &args.format {
        Some(s) => OutputFormat::parse(s)
            .ok_or_else(|| anyhow::anyhow!("Unknown record format: {s} (expected json or jsonl)"))?,
        None => OutputFormat::parse(&config.output.format).unwrap_or(OutputFormat::Json),
    };
    let pretty = args.pretty || config.output.pretty;
    let include_data_url = args.data_url || config.output.include_data_url;

    let output_dir = args
        .output_dir
        .as_deref()
        .map(|dir| PathBuf::from(shellexpand::tilde(dir).into_owned()));
    if let Some(dir) = &output_dir {
        std::fs::create_dir_all(dir)?;
    }

    let pipeline = FilterPipeline::new(config)?;
    let options = BatchOptions {
        output_dir: output_dir.as_deref(),
        no_write: args.no_write,
        include_data_url,
    };
    let (records, failed) = run_batch(&pipeline, &args.inputs, &options).await;

    // Records for the successes always go out, even if some inputs failed.
    let stdout = std::io::stdout().lock();
    RecordWriter::new(stdout, format, pretty).write_all(&records)?;

    if failed > 0 {
        tracing::warn!("{} of {} inputs failed", failed, args.inputs.len());
        if records.is_empty() {
            anyhow::bail!("All {} inputs failed", failed);
        }
    }
    Ok(())
}

/// Run the pipeline over each input in turn.
///
/// A failing input is logged and counted, never fatal: the remaining inputs
/// still get processed and the successes still get records, so a batch with
/// one rotten file accounts for everything it wrote to disk.
async fn run_batch(
    pipeline: &FilterPipeline,
    inputs: &[PathBuf],
    options: &BatchOptions<'_>,
) -> (Vec<FilterRecord>, usize) {
    let mut records = Vec::with_capacity(inputs.len());
    let mut failed = 0;

    for input in inputs {
        let result = match pipeline.run(input).await {
            Ok(result) => result,
            Err(e) => {
                failed += 1;
                tracing::error!("Failed: {:?} - {}", input, e);
                continue;
            }
        };

        let mut record = FilterRecord::from_result(&result);
        if !options.no_write {
            let path = output_path(input, options.output_dir);
            if let Err(e) = std::fs::write(&path, &result.processed.bytes) {
                failed += 1;
                tracing::error!("Failed: {:?} - cannot write {:?}: {}", input, path, e);
                continue;
            }
            tracing::info!(
                "Wrote {} ({}x{}, {} bytes)",
                path.display(),
                result.processed.width,
                result.processed.height,
                result.processed.bytes.len()
            );
            record.output_path = Some(path);
        }
        if options.include_data_url {
            record.data_url = Some(to_data_url(&result.processed.bytes));
        }
        records.push(record);
    }

    (records, failed)
}

/// Where the processed image lands: `<stem>.aversa.jpg`, either next to the
/// input or inside `--output-dir`.
fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let file_name = format!("{stem}.aversa.jpg");
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn write_png(dir: &Path, name: &str) -> PathBuf {
        let img = RgbaImage::from_pixel(8, 8, Rgba([128, 128, 128, 255]));
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        let path = dir.join(name);
        std::fs::write(&path, buf.into_inner()).unwrap();
        path
    }

    #[test]
    fn test_output_path_next_to_input() {
        let path = output_path(Path::new("/photos/burger.png"), None);
        assert_eq!(path, Path::new("/photos/burger.aversa.jpg"));
    }

    #[test]
    fn test_output_path_in_output_dir() {
        let path = output_path(Path::new("/photos/burger.png"), Some(Path::new("/out")));
        assert_eq!(path, Path::new("/out/burger.aversa.jpg"));
    }

    #[test]
    fn test_output_path_without_stem() {
        let path = output_path(Path::new("/photos/..."), Some(Path::new("/out")));
        assert!(path.to_str().unwrap().ends_with(".aversa.jpg"));
    }

    #[tokio::test]
    async fn test_batch_continues_past_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        // Valid PNG magic, rotten body: passes validation, fails decode.
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"\x89PNG but nothing like a real one").unwrap();
        let good = write_png(dir.path(), "good.png");

        let pipeline = FilterPipeline::new(Config::default()).unwrap();
        let options = BatchOptions {
            output_dir: Some(dir.path()),
            no_write: false,
            include_data_url: false,
        };
        // The bad input comes first so the loop has to get past it.
        let (records, failed) =
            run_batch(&pipeline, &[bad.clone(), good.clone()], &options).await;

        assert_eq!(failed, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].original.file_name, "good.png");
        let written = records[0].output_path.as_ref().unwrap();
        assert!(written.exists());
        assert_eq!(&std::fs::read(written).unwrap()[0..3], &[0xFF, 0xD8, 0xFF]);
        // The failed input left nothing behind.
        assert!(!dir.path().join("bad.aversa.jpg").exists());
    }

    #[tokio::test]
    async fn test_batch_all_good_counts_no_failures() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_png(dir.path(), "a.png");
        let b = write_png(dir.path(), "b.png");

        let pipeline = FilterPipeline::new(Config::default()).unwrap();
        let options = BatchOptions {
            output_dir: Some(dir.path()),
            no_write: true,
            include_data_url: true,
        };
        let (records, failed) = run_batch(&pipeline, &[a, b], &options).await;

        assert_eq!(failed, 0);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.output_path.is_none()));
        assert!(records
            .iter()
            .all(|r| r.data_url.as_deref().unwrap().starts_with("data:image/jpeg;base64,")));
    }
}
