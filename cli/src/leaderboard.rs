use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use tilesweep_core::ResultsSink;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub player: String,
    pub secs: u64,
}

impl Entry {
    fn parse(line: &str) -> Option<Self> {
        let (player, secs) = line.rsplit_once(" => ")?;
        Some(Self {
            player: player.to_string(),
            secs: secs.trim().parse().ok()?,
        })
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.player, self.secs)
    }
}

/// Winning times, one `name => seconds` line each, fastest first.
#[derive(Clone, Debug)]
pub struct Leaderboard {
    path: PathBuf,
}

impl Leaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn entries(&self) -> io::Result<Vec<Entry>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };

        Ok(text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| {
                let entry = Entry::parse(line);
                if entry.is_none() {
                    log::warn!("Skipping malformed leaderboard line {:?}", line);
                }
                entry
            })
            .collect())
    }
}

impl ResultsSink for Leaderboard {
    fn record_result(&mut self, player: &str, elapsed_secs: u64) -> io::Result<()> {
        let mut entries = self.entries()?;
        entries.push(Entry {
            player: player.to_string(),
            secs: elapsed_secs,
        });
        entries.sort_by_key(|entry| entry.secs);

        let text: String = entries.iter().map(|entry| format!("{}\n", entry)).collect();
        fs::write(&self.path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let board = Leaderboard::new(dir.path().join("leaderboard"));
        assert!(board.entries().unwrap().is_empty());
    }

    #[test]
    fn records_are_kept_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let mut board = Leaderboard::new(dir.path().join("leaderboard"));

        board.record_result("ada", 40).unwrap();
        board.record_result("bob", 12).unwrap();
        board.record_result("cy => d", 40).unwrap();

        let entries = board.entries().unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.player.as_str()).collect();
        assert_eq!(names, vec!["bob", "ada", "cy => d"]);
        assert_eq!(
            fs::read_to_string(dir.path().join("leaderboard")).unwrap(),
            "bob => 12\nada => 40\ncy => d => 40\n"
        );
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard");
        fs::write(&path, "ada => 3\ngarbage\n\nbob => x\n").unwrap();

        let entries = Leaderboard::new(path).entries().unwrap();

        assert_eq!(
            entries,
            vec![Entry {
                player: "ada".to_string(),
                secs: 3
            }]
        );
    }
}
