use crate::errors::Result;
use crate::models::CartesianRecord;
use csv::{Writer, WriterBuilder};
use log::info;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Writes the `SATNAME:`/`X:`/.../`VZ:` key-value file, replacing any previous content.
pub fn write_key_value<P: AsRef<Path>>(record: &CartesianRecord, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    write!(file, "{}", record)?;
    info!("{} written to {}", record.satellite_name, path.display());
    Ok(())
}

/// CSV sink with one row per converted TLE. The header is written only when the file is new
/// or empty, so repeated runs append to the same table.
pub struct CsvSink {
    writer: Writer<File>,
}

impl CsvSink {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(CsvSink {
            writer: Writer::from_writer(file),
        })
    }

    pub fn append<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_empty = file.metadata()?.len() == 0;
        let writer = WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);
        Ok(CsvSink { writer })
    }

    pub fn write(&mut self, record: &CartesianRecord) -> Result<()> {
        self.writer.serialize(record.to_row())?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hifitime::Epoch;
    use nalgebra as na;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tle2state-output-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let _ = fs::remove_file(&path);
        path
    }

    fn record(name: &str) -> CartesianRecord {
        CartesianRecord {
            satellite_name: name.to_string(),
            epoch: Epoch::from_gregorian_utc(2021, 2, 26, 6, 38, 34, 0),
            position_km: na::Vector3::new(5820.5672, 2037.4503, 2864.4839),
            velocity_km_s: na::Vector3::new(0.637981, 5.295128, -5.062109),
        }
    }

    #[test]
    fn key_value_file_is_overwritten() {
        let path = scratch("coords.txt");
        write_key_value(&record("FIRST"), &path).unwrap();
        write_key_value(&record("SECOND"), &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("SATNAME: SECOND\nX: 5820.567200\n"));
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn appended_csv_has_a_single_header() {
        let path = scratch("coords.csv");
        for name in ["A", "B"] {
            let mut sink = CsvSink::append(&path).unwrap();
            sink.write(&record(name)).unwrap();
            sink.flush().unwrap();
        }

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["satellite_name", "epoch", "x_km", "y_km", "z_km", "vx_km_s", "vy_km_s", "vz_km_s"]
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "B");
        assert_eq!(rows[0][2].parse::<f64>().unwrap(), 5820.5672);
    }

    #[test]
    fn created_csv_replaces_content() {
        let path = scratch("fresh.csv");
        fs::write(&path, "stale\n").unwrap();
        let mut sink = CsvSink::create(&path).unwrap();
        sink.write(&record("ISS (ZARYA)")).unwrap();
        sink.flush().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("satellite_name,epoch,"));
        assert!(text.contains("ISS (ZARYA)"));
        assert!(!text.contains("stale"));
    }
}
