use crate::file::csv::{error::FileError, settings::CsvSettings};
use csv::{ByteRecord, ByteRecordsIntoIter, Reader, ReaderBuilder};
use std::{fs::File, io, path::PathBuf};
use tracing::debug;

/// One data record of the source file, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// 1-based physical line the record starts on.
    pub line: u64,
    pub fields: Vec<String>,
}

/// A delimited file read record by record. Nothing is buffered beyond the
/// record currently being handed out.
///
/// Fields are decoded as UTF-8; invalid byte sequences become U+FFFD
/// instead of failing the read.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    settings: CsvSettings,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>, settings: CsvSettings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    /// Reads the first record only. Returns `None` for an empty file.
    pub fn read_header(&self) -> Result<Option<Vec<String>>, FileError> {
        let mut records = self.reader()?.into_byte_records();
        match records.next() {
            Some(Ok(record)) => Ok(Some(decode(&record))),
            Some(Err(e)) => Err(FileError::ReadError(format!(
                "Error reading CSV header: {e}"
            ))),
            None => Ok(None),
        }
    }

    /// Opens the file for streaming. When the settings declare a header, the
    /// first record is consumed here and never yielded.
    pub fn records(&self) -> Result<CsvRecords, FileError> {
        let mut records = self.reader()?.into_byte_records();
        if self.settings.has_header
            && let Some(Err(e)) = records.next()
        {
            return Err(FileError::ReadError(format!(
                "Error reading CSV header: {e}"
            )));
        }
        debug!("Opened {} for streaming", self.path.display());
        Ok(CsvRecords { records })
    }

    fn reader(&self) -> Result<Reader<File>, FileError> {
        let file = File::open(&self.path).map_err(|e| self.open_error(e))?;
        Ok(ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.settings.delimiter)
            .flexible(true)
            .from_reader(file))
    }

    fn open_error(&self, err: io::Error) -> FileError {
        let path = self.path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => FileError::NotFound(path),
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied(path),
            _ => FileError::IoError(err),
        }
    }
}

pub struct CsvRecords {
    records: ByteRecordsIntoIter<File>,
}

impl Iterator for CsvRecords {
    type Item = Result<SourceRow, FileError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => {
                return Some(Err(FileError::ReadError(format!(
                    "Error reading CSV record: {e}"
                ))));
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        Some(Ok(SourceRow {
            line,
            fields: decode(&record),
        }))
    }
}

fn decode(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}
