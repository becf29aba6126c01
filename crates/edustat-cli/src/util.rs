use std::{
    fmt,
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use edustat_analysis::record::Dataset;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` decides the level unless `verbose` forces `debug`; the
/// fallback is `warn`.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Destination of a rendered report.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    /// Opens `path` for writing, or locks stdout when no path is given.
    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let Some(path) = output_path else {
            return Ok(Output::Stdout(io::stdout().lock()));
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON report to {self}"))?;
        self.finish_with(b"\n")
    }

    pub fn write_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.finish_with(text.as_bytes())
    }

    fn finish_with(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.write_all(bytes)
            .and_then(|()| self.flush())
            .with_context(|| format!("Failed to write report to {self}"))
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout(_) => f.write_str("stdout"),
            Output::File { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Read student records from a CSV file
///
/// # Errors
///
/// Returns error if the file cannot be opened or parsed, or holds no usable
/// records
pub fn read_dataset_file<P>(path: P) -> anyhow::Result<Dataset>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    tracing::info!("Loading records from {}", path.display());
    let dataset = Dataset::open(path)
        .with_context(|| format!("Failed to load dataset: {}", path.display()))?;
    if dataset.is_empty() {
        anyhow::bail!("{} contains no records with subject and gender", path.display());
    }
    tracing::info!("Loaded {} records", dataset.len());
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn file_output_displays_its_path_and_writes_text() {
        let path = std::env::temp_dir().join(format!("edustat-output-{}.txt", std::process::id()));
        let mut output = Output::from_output_path(Some(path.clone())).unwrap();
        assert_eq!(output.to_string(), path.display().to_string());

        output.write_text("β = 0.600\n").unwrap();
        drop(output);
        assert_eq!(fs::read_to_string(&path).unwrap(), "β = 0.600\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_output_directory_is_reported() {
        let err = Output::from_output_path(Some(PathBuf::from("/nonexistent/dir/report.json")))
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/dir/report.json"));
    }
}
