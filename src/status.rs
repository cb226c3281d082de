use crate::error::Result;
use crate::model::CommitRecord;
use std::fs;
use std::path::Path;

/// Overwrite `path` with the serialized record.
pub fn write_record(path: &Path, record: &CommitRecord) -> Result<()> {
    let mut content = serde_json::to_string(record)?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn read_record(path: &Path) -> Result<CommitRecord> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PulseError;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn writes_single_field_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let record = CommitRecord::new("2025-06-16T10:00:00+02:00");

        write_record(&path, &record).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\"date\":\"2025-06-16T10:00:00+02:00\"}\n"
        );
        assert_eq!(read_record(&path).unwrap(), record);
    }

    #[test]
    fn rewriting_same_record_is_byte_identical() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");
        let record = CommitRecord::new("2025-12-31T00:00:00+00:00");

        write_record(&path, &record).unwrap();
        let first = fs::read(&path).unwrap();
        write_record(&path, &record).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn overwrites_previous_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.json");

        write_record(&path, &CommitRecord::new("2025-01-01T00:00:00+00:00")).unwrap();
        write_record(&path, &CommitRecord::new("2025-01-02T00:00:00+00:00")).unwrap();

        assert_eq!(read_record(&path).unwrap().date, "2025-01-02T00:00:00+00:00");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("data.json");

        let err = write_record(&path, &CommitRecord::new("x")).unwrap_err();
        assert!(matches!(err, PulseError::Io(_)));
    }
}
