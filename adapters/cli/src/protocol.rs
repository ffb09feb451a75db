#![allow(clippy::missing_errors_doc)]

use std::io::{self, BufRead, Write};

use halite_fleet_core::{
    Command, PlayerId, Position, Ruleset, ShipId, ShipSnapshot, Torus, Update,
};
use halite_fleet_world::GameSetup;
use thiserror::Error;

/// Reasons the host's text stream could not be understood.
#[derive(Debug, Error)]
pub(crate) enum ProtocolError {
    /// Reading from the host failed.
    #[error("failed to read from host")]
    Io(#[from] io::Error),
    /// The host closed its output in the middle of a message.
    #[error("input ended while expecting {expected}")]
    UnexpectedEof {
        /// Description of the missing line.
        expected: &'static str,
    },
    /// A line carried fewer values than required.
    #[error("line {line}: missing {expected}")]
    MissingValue {
        /// One-based input line number.
        line: usize,
        /// Description of the missing value.
        expected: &'static str,
    },
    /// A token was not a number in the expected range.
    #[error("line {line}: `{token}` is not a valid {expected}")]
    InvalidValue {
        /// One-based input line number.
        line: usize,
        /// Offending token.
        token: String,
        /// Description of the value.
        expected: &'static str,
    },
    /// The constants line was not the expected JSON object.
    #[error("invalid game constants")]
    Constants(#[source] serde_json::Error),
    /// The map has a zero or oversized dimension.
    #[error("map dimensions {width}x{height} are out of range")]
    InvalidDimensions {
        /// Announced width.
        width: u32,
        /// Announced height.
        height: u32,
    },
    /// A map row did not hold one value per column.
    #[error("map row {row} holds {actual} cells, expected {expected}")]
    RowWidth {
        /// Zero-based row index.
        row: u32,
        /// Announced width.
        expected: u32,
        /// Cells present on the row.
        actual: usize,
    },
}

/// One whitespace-separated line of the host stream.
#[derive(Debug)]
struct Record {
    line: usize,
    tokens: Vec<String>,
}

impl Record {
    fn value<T: std::str::FromStr>(
        &self,
        index: usize,
        expected: &'static str,
    ) -> Result<T, ProtocolError> {
        let token = self.tokens.get(index).ok_or(ProtocolError::MissingValue {
            line: self.line,
            expected,
        })?;
        token.parse().map_err(|_| ProtocolError::InvalidValue {
            line: self.line,
            token: token.clone(),
            expected,
        })
    }

    fn position(&self, first: usize) -> Result<Position, ProtocolError> {
        Ok(Position::new(
            self.value(first, "x coordinate")?,
            self.value(first + 1, "y coordinate")?,
        ))
    }
}

/// Line-oriented reader for the messages the host sends to a bot.
#[derive(Debug)]
pub(crate) struct HostReader<R> {
    input: R,
    buffer: String,
    line: usize,
}

impl<R: BufRead> HostReader<R> {
    /// Wraps the host's output stream.
    pub(crate) fn new(input: R) -> Self {
        Self {
            input,
            buffer: String::new(),
            line: 0,
        }
    }

    /// Reads the start-up announcement: constants, players, shipyards and map.
    pub(crate) fn read_setup(&mut self) -> Result<GameSetup, ProtocolError> {
        let constants = self
            .next_line()?
            .ok_or(ProtocolError::UnexpectedEof {
                expected: "game constants",
            })?;
        let ruleset: Ruleset =
            serde_json::from_str(&constants).map_err(ProtocolError::Constants)?;

        let header = self.record("player count and id")?;
        let player_count: usize = header.value(0, "player count")?;
        let my_id = PlayerId::new(header.value(1, "player id")?);

        let mut shipyards = Vec::with_capacity(player_count);
        for _ in 0..player_count {
            let record = self.record("player shipyard")?;
            let player = PlayerId::new(record.value(0, "player id")?);
            shipyards.push((player, record.position(1)?));
        }

        let dimensions = self.record("map dimensions")?;
        let width: u32 = dimensions.value(0, "map width")?;
        let height: u32 = dimensions.value(1, "map height")?;
        if width == 0 || height == 0 || i32::try_from(width.max(height)).is_err() {
            return Err(ProtocolError::InvalidDimensions { width, height });
        }

        let mut halite = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            let record = self.record("map row")?;
            if record.tokens.len() != width as usize {
                return Err(ProtocolError::RowWidth {
                    row,
                    expected: width,
                    actual: record.tokens.len(),
                });
            }
            for column in 0..record.tokens.len() {
                halite.push(record.value(column, "halite amount")?);
            }
        }

        Ok(GameSetup {
            ruleset,
            my_id,
            torus: Torus::new(width, height),
            shipyards,
            halite,
        })
    }

    /// Reads one turn's frame, or `None` once the host has closed the stream.
    pub(crate) fn read_frame(
        &mut self,
        player_count: usize,
    ) -> Result<Option<Vec<Update>>, ProtocolError> {
        let Some(turn_line) = self.next_line()? else {
            return Ok(None);
        };
        let turn_record = self.tokenize(&turn_line);
        let mut updates = vec![Update::TurnStarted {
            turn: turn_record.value(0, "turn number")?,
        }];

        for _ in 0..player_count {
            let status = self.record("player status")?;
            let player = PlayerId::new(status.value(0, "player id")?);
            let ships: usize = status.value(1, "ship count")?;
            let dropoffs: usize = status.value(2, "drop-off count")?;
            updates.push(Update::PlayerStatus {
                player,
                halite: status.value(3, "halite stockpile")?,
            });

            for _ in 0..ships {
                let record = self.record("ship")?;
                updates.push(Update::ShipObserved {
                    player,
                    ship: ShipSnapshot {
                        id: ShipId::new(record.value(0, "ship id")?),
                        position: record.position(1)?,
                        cargo: record.value(3, "ship cargo")?,
                    },
                });
            }
            for _ in 0..dropoffs {
                let record = self.record("drop-off")?;
                updates.push(Update::DropoffObserved {
                    player,
                    position: record.position(1)?,
                });
            }
        }

        let changes: usize = self.record("cell update count")?.value(0, "cell update count")?;
        for _ in 0..changes {
            let record = self.record("cell update")?;
            updates.push(Update::CellHalite {
                position: record.position(0)?,
                halite: record.value(2, "halite amount")?,
            });
        }

        Ok(Some(updates))
    }

    fn record(&mut self, expected: &'static str) -> Result<Record, ProtocolError> {
        let line = self
            .next_line()?
            .ok_or(ProtocolError::UnexpectedEof { expected })?;
        Ok(self.tokenize(&line))
    }

    fn tokenize(&self, line: &str) -> Record {
        Record {
            line: self.line,
            tokens: line.split_whitespace().map(str::to_owned).collect(),
        }
    }

    /// Next non-blank line, or `None` at end of input.
    fn next_line(&mut self) -> Result<Option<String>, ProtocolError> {
        loop {
            self.buffer.clear();
            if self.input.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let trimmed = self.buffer.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_owned()));
            }
        }
    }
}

/// Renders one turn's commands as the single line the host expects.
pub(crate) fn encode_commands(commands: &[Command]) -> String {
    commands
        .iter()
        .map(|command| match command {
            Command::Move { ship, direction } => {
                format!("m {} {}", ship.get(), direction.protocol_char())
            }
            Command::ConvertToDropoff { ship } => format!("c {}", ship.get()),
            Command::SpawnShip => "g".to_owned(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sends one turn's commands to the host and flushes.
pub(crate) fn write_commands<W: Write>(out: &mut W, commands: &[Command]) -> io::Result<()> {
    writeln!(out, "{}", encode_commands(commands))?;
    out.flush()
}
