use crate::error::{Result, StoreError};
use soul_playlist::{LoaderConfig, PlayableTrack, Playlist, PlaylistRecord};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const EXTENSION: &str = "json";

/// Folder of playlist documents, one `<name>.json` per playlist
#[derive(Debug, Clone)]
pub struct PlaylistStore {
    folder: PathBuf,
}

impl PlaylistStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        Self::new(config.playlists_folder.clone())
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn folder_exists(&self) -> bool {
        self.folder.is_dir()
    }

    /// Create the playlist folder if it does not exist yet
    pub fn ensure_folder(&self) -> Result<()> {
        fs::create_dir_all(&self.folder)?;
        Ok(())
    }

    /// Names of all stored playlists, sorted
    ///
    /// Creates the folder on first use.
    pub fn names(&self) -> Result<Vec<String>> {
        if !self.folder_exists() {
            self.ensure_folder()?;
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.folder)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.path_for(name)?.is_file())
    }

    /// Create an empty, unshuffled playlist
    pub fn create(&self, name: &str, owner_id: &str, group_id: &str) -> Result<PlaylistRecord> {
        let path = self.path_for(name)?;
        self.ensure_folder()?;
        if path.exists() {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }

        let record = PlaylistRecord::new(name, owner_id, group_id);
        write_record(&path, &record)?;
        debug!("Created playlist {} at {:?}", name, path);
        Ok(record)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.path_for(name)?;
        fs::remove_file(&path).map_err(|e| not_found_or_io(name, e))?;
        debug!("Deleted playlist {}", name);
        Ok(())
    }

    /// Append raw references to the end of a playlist
    pub fn append_tracks(&self, name: &str, tracks: &[String]) -> Result<PlaylistRecord> {
        self.update(name, |record| record.tracks.extend_from_slice(tracks))
    }

    pub fn set_shuffle(&self, name: &str, shuffle: bool) -> Result<PlaylistRecord> {
        self.update(name, |record| record.shuffle = shuffle)
    }

    /// Read a playlist document, `None` if it does not exist
    ///
    /// The returned record is named after its file, whatever the document says.
    pub fn get(&self, name: &str) -> Result<Option<PlaylistRecord>> {
        let path = self.path_for(name)?;
        match read_record(&path) {
            Ok(mut record) => {
                record.name = name.to_string();
                Ok(Some(record))
            }
            Err(StoreError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                warn!("Failed to read playlist {}: {}", name, e);
                Err(e)
            }
        }
    }

    /// Read a playlist and build the in-memory aggregate ready for loading
    pub fn load_playlist<T: PlayableTrack>(&self, name: &str) -> Result<Option<Playlist<T>>> {
        Ok(self.get(name)?.map(Playlist::from_record))
    }

    /// Number of playlists owned by `owner_id`
    ///
    /// Unreadable documents are skipped.
    pub fn count_for_owner(&self, owner_id: &str) -> Result<usize> {
        let mut count = 0;
        for name in self.names()? {
            match self.get(&name) {
                Ok(Some(record)) if record.author_id == owner_id => count += 1,
                Ok(_) => {}
                Err(e) => debug!("Skipping playlist {} while counting: {}", name, e),
            }
        }
        Ok(count)
    }

    fn update(
        &self,
        name: &str,
        change: impl FnOnce(&mut PlaylistRecord),
    ) -> Result<PlaylistRecord> {
        let path = self.path_for(name)?;
        let mut record = read_record(&path).map_err(|e| match e {
            StoreError::Io(io) => not_found_or_io(name, io),
            other => other,
        })?;

        change(&mut record);
        write_record(&path, &record)?;
        Ok(record)
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.folder.join(format!("{}.{}", name, EXTENSION)))
    }
}

fn validate_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == "..";

    if invalid {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn not_found_or_io(name: &str, e: std::io::Error) -> StoreError {
    if e.kind() == ErrorKind::NotFound {
        StoreError::NotFound(name.to_string())
    } else {
        StoreError::Io(e)
    }
}

fn read_record(path: &Path) -> Result<PlaylistRecord> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn write_record(path: &Path, record: &PlaylistRecord) -> Result<()> {
    let contents = serde_json::to_string_pretty(record)?;
    fs::write(path, contents)?;
    Ok(())
}
