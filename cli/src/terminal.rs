use std::io::{self, BufRead, Write};

use tilesweep_core::*;

/// Line-oriented console over any reader/writer pair, normally stdin and stdout.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `message` and returns the next trimmed line of input.
    pub fn prompt(&mut self, message: &str) -> io::Result<String> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }
}

/// Parses `"row, col"` (a comma and/or spaces between the two numbers).
pub fn parse_pair(line: &str) -> Option<Coord2> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<Coord>());

    let first = parts.next()?.ok()?;
    let second = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((first, second))
}

impl<R: BufRead, W: Write> PlayerInput for Terminal<R, W> {
    fn request_action(&mut self, board: &Board) -> io::Result<Action> {
        let mut answer = self.prompt("Choose to reveal (r) or flag (f) a tile.")?;
        let kind = loop {
            match answer.parse::<ActionKind>() {
                Ok(kind) => break kind,
                Err(err) => answer = self.prompt(&err.to_string())?,
            }
        };

        let mut answer = self.prompt("Choose which tile to change")?;
        let position = loop {
            match parse_pair(&answer) {
                Some(position) if board.is_legal_position(position) => break position,
                _ => {
                    log::debug!("Rejected position input {:?}", answer);
                    answer = self.prompt("Choose a valid position")?;
                }
            }
        };

        Ok(Action { kind, position })
    }
}

impl<R: BufRead, W: Write> Confirm for Terminal<R, W> {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let answer = self.prompt(prompt)?;
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

impl<R: BufRead, W: Write> DisplaySink for Terminal<R, W> {
    fn render(&mut self, view: &BoardView) -> io::Result<()> {
        write!(self.output, "{}", view)?;
        self.output.flush()
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }
}
