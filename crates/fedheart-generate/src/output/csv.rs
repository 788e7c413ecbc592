use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use fedheart_core::Dataset;

/// Write a dataset as CSV with a header row in schema order.
pub fn write_dataset_csv(path: &Path, dataset: &Dataset) -> Result<u64, csv::Error> {
    let writer = BufWriter::new(File::create(path).map_err(csv::Error::from)?);
    write_dataset(writer, dataset)
}

/// Write a dataset as CSV into any writer, returning the bytes written.
pub fn write_dataset<W: Write>(inner: W, dataset: &Dataset) -> Result<u64, csv::Error> {
    let counting = CountingWriter::new(inner);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(dataset.feature_names())?;

    for row in dataset.rows() {
        let record: Vec<String> = row.iter().map(|value| value.to_csv()).collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
