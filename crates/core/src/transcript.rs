//! Line-oriented rendering of a run's events and a stable digest over them.

use std::fmt;
use std::hash::Hasher;
use std::io::{self, Write};

use xxhash_rust::xxh3::Xxh3;

use crate::types::NavEvent;

#[derive(Clone, Copy, Debug)]
pub struct Transcript<'a> {
    events: &'a [NavEvent],
}

impl<'a> Transcript<'a> {
    pub fn new(events: &'a [NavEvent]) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Writes one event per line, each terminated by `\n`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for event in self.events {
            writeln!(writer, "{event}")?;
        }
        writer.flush()
    }

    /// XXH3 over the rendered lines; equal transcripts always hash equal.
    pub fn digest(&self) -> u64 {
        let mut hasher = Xxh3::new();
        for event in self.events {
            hasher.write(event.to_string().as_bytes());
            hasher.write_u8(b'\n');
        }
        hasher.finish()
    }
}

impl fmt::Display for Transcript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in self.events {
            writeln!(f, "{event}")?;
        }
        Ok(())
    }
}
