// JSON store adapter - Result set persistence as a pretty-printed JSON array

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::domain::model::{ResultSet, VideoRecord};
use crate::ports::{ResultStorePort, StoreError};

/// Writes result sets as JSON, replacing the target atomically
#[derive(Debug, Default)]
pub struct JsonFileStore;

impl JsonFileStore {
    pub fn new() -> Self {
        Self
    }
}

impl ResultStorePort for JsonFileStore {
    fn save(&self, result: &ResultSet, path: &Path) -> Result<(), StoreError> {
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        // Temp file in the target directory so the rename stays on one filesystem
        let temp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, result.videos())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        temp.persist(path).map_err(|e| StoreError::Io(e.error))?;

        info!(path = %path.display(), videos = result.len(), "Video data saved");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<ResultSet, StoreError> {
        let file = fs::File::open(path)?;
        let videos: Vec<VideoRecord> = serde_json::from_reader(BufReader::new(file))?;
        Ok(ResultSet::from_videos(videos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::DurationClass;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_set() -> ResultSet {
        let mut set = ResultSet::new();
        set.append_page(vec![VideoRecord {
            video_id: "vid1".to_string(),
            title: "Café ☕".to_string(),
            published_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            duration: DurationClass::Short,
            description: String::new(),
            channel_title: "Channel".to_string(),
            thumbnail_url: String::new(),
            video_url: VideoRecord::watch_url("vid1"),
        }]);
        set
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("videos.json");
        let store = JsonFileStore::new();

        store.save(&sample_set(), &path).unwrap();
        let loaded = store.load(&path).unwrap();

        assert_eq!(loaded.videos(), sample_set().videos());
    }

    #[test]
    fn test_save_keeps_non_ascii_and_writes_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("videos.json");

        JsonFileStore::new().save(&sample_set(), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.trim_start().starts_with('['));
        assert!(content.contains("Café ☕"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = JsonFileStore::new().load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
