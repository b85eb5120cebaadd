//! The command line front of the emulator. Loads the program image named
//! by the single positional argument, binds standard input and output to
//! the machine and runs it until it halts.

#[macro_use]
extern crate log;

use um_core::{Cpu, Image, ImageError};

use log::LevelFilter;
use std::cell::RefCell;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::rc::Rc;

fn main() -> ExitCode {
    env_logger::Builder::new()
        .format(|f, record| {
            writeln!(f, "{}: {}", record.level(), record.args())
        })
        .filter(None, LevelFilter::Warn)
        .parse_default_env()
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(path), None) = (args.next(), args.next()) else {
        eprintln!("usage: um <program>");
        return ExitCode::FAILURE;
    };

    let image = match Image::from_file(Path::new(&path)) {
        Ok(image) => image,
        Err(ImageError::IoError(..)) => {
            println!("{path}: No such file or directory");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            println!("{path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let input = Rc::new(RefCell::new(io::stdin().lock()));
    let output = Rc::new(RefCell::new(io::stdout().lock()));

    let mut cpu = Cpu::new(image, input, output);

    match cpu.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(trap) => {
            error!("{trap}");
            ExitCode::FAILURE
        }
    }
}
