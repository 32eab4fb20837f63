use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::domain::RescueRequest;

/// Durable, append-only home for accepted rescue requests.
pub trait RequestStore: Send + Sync {
    fn append(&self, request: &RescueRequest) -> Result<(), StoreError>;
    fn list(&self) -> Result<Vec<RescueRequest>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request log {path} is not accessible: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("request log {path} could not be encoded or decoded: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// CSV-backed request log. The header row is written once, when the file is created.
#[derive(Debug)]
pub struct CsvRequestStore {
    path: PathBuf,
    writer: Mutex<()>,
}

impl CsvRequestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> StoreError {
        StoreError::Csv {
            path: self.path.clone(),
            source,
        }
    }

    fn open_for_append(&self) -> Result<(File, bool), StoreError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| self.io_error(err))?;
        let is_new = file.metadata().map_err(|err| self.io_error(err))?.len() == 0;
        Ok((file, is_new))
    }
}

impl RequestStore for CsvRequestStore {
    fn append(&self, request: &RescueRequest) -> Result<(), StoreError> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let (file, is_new) = self.open_for_append()?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        writer
            .serialize(request)
            .map_err(|err| self.csv_error(err))?;
        writer.flush().map_err(|err| self.io_error(err))?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<RescueRequest>, StoreError> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.io_error(err)),
        };

        let mut reader = csv::ReaderBuilder::new().from_reader(file);
        reader
            .deserialize::<RescueRequest>()
            .map(|row| row.map_err(|err| self.csv_error(err)))
            .collect()
    }
}
