use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tilesweep_core::{Game, GameStore};

/// Keeps the game in progress as a JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GameStore for JsonFileStore {
    fn save(&mut self, game: &Game) -> io::Result<()> {
        // write next to the target then rename, an interrupted save keeps the previous one
        let tmp = self.path.with_extension("tmp");
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer(&mut writer, game)?;
        writer.flush()?;
        drop(writer);
        fs::rename(&tmp, &self.path)?;
        log::trace!("Saved game to {}", self.path.display());
        Ok(())
    }

    fn load(&mut self) -> io::Result<Game> {
        let reader = BufReader::new(File::open(&self.path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    fn clear(&mut self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
