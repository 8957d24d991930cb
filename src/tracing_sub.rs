use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Arc;

use crate::config::LogConfig;
use crate::error::AppError;

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<File>),
    Sink(io::Sink),
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(f) => f.as_ref().write(buf),
            DelegatingInner::Sink(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(f) => f.as_ref().flush(),
            DelegatingInner::Sink(s) => s.flush(),
        }
    }
}

/// Hands out writers onto the log file, or onto a sink when no file is
/// configured. The terminal belongs to the UI, so stderr is never used.
#[derive(Clone, Debug, Default)]
pub struct SubscriberMakeWriter {
    file: Option<Arc<File>>,
}

impl SubscriberMakeWriter {
    pub fn discard() -> Self {
        Self::default()
    }

    pub fn open(config: &LogConfig) -> Result<Self, AppError> {
        let Some(path) = &config.file else {
            return Ok(Self::discard());
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| AppError::LogFile {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            file: Some(Arc::new(file)),
        })
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.file {
            Some(file) => DelegatingInner::File(Arc::clone(file)),
            None => DelegatingInner::Sink(io::sink()),
        };
        DelegatingWriter { inner }
    }
}

/// Installs the global subscriber. Opening the log file can fail; a second
/// call is a no-op for the global subscriber.
pub fn init(config: &LogConfig) -> Result<(), AppError> {
    let writer = SubscriberMakeWriter::open(config)?;
    let _ = tracing_subscriber::fmt()
        .with_max_level(config.level)
        .with_writer(writer)
        .with_target(false)
        .with_thread_names(false)
        .with_ansi(false)
        .compact()
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn writes_go_to_the_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dash.log");
        let config = LogConfig {
            file: Some(path.clone()),
            level: Level::DEBUG,
        };
        let make = SubscriberMakeWriter::open(&config).unwrap();
        let mut writer = make.make_writer();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();
        let mut contents = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "hello\n");
    }

    #[test]
    fn missing_directory_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("dash.log");
        let config = LogConfig {
            file: Some(path.clone()),
            level: Level::INFO,
        };
        match SubscriberMakeWriter::open(&config) {
            Err(AppError::LogFile { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn no_file_discards() {
        let config = LogConfig {
            file: None,
            level: Level::INFO,
        };
        let make = SubscriberMakeWriter::open(&config).unwrap();
        let mut writer = make.make_writer();
        assert_eq!(writer.write(b"dropped").unwrap(), 7);
        assert!(init(&config).is_ok());
    }
}
