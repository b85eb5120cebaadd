//! Emulation of the Universal Machine, a word addressed virtual machine
//! with eight registers and a segmented, handle addressed memory.
//!
//! The crate is the execution engine only. It takes an already loaded
//! program [`Image`] plus bindings to an [`Input`] byte source and an
//! [`Output`] byte sink, and runs until the program halts. Reading the
//! image from disk and binding standard input and output is the front's
//! job.

#[macro_use]
extern crate log;

#[cfg(test)]
mod test;

pub mod cpu;
pub mod image;
pub mod mem;

pub use cpu::{Cpu, Trap};
pub use image::{Image, ImageError};
pub use mem::Memory;

use std::io;

/// Source of bytes for the input instruction.
pub trait Input {
    /// Read a single byte. `None` means end of input.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Sink of bytes for the output instruction.
pub trait Output {
    /// Write a single byte. The byte must be observable once the call
    /// returns, before the machine fetches its next instruction.
    fn write_byte(&mut self, val: u8) -> io::Result<()>;
}

// Any reader is an input source, so standard input, a byte slice or an
// empty stream all bind without adapters.
impl<R: io::Read> Input for R {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0;
        loop {
            match self.read(std::slice::from_mut(&mut byte)) {
                Ok(0) => return Ok(None),
                Ok(..) => return Ok(Some(byte)),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => (),
                Err(err) => return Err(err),
            }
        }
    }
}

// Likewise any writer is an output sink. The flush per byte keeps the
// stream unbuffered at the semantic level.
impl<W: io::Write> Output for W {
    fn write_byte(&mut self, val: u8) -> io::Result<()> {
        self.write_all(&[val])?;
        self.flush()
    }
}
