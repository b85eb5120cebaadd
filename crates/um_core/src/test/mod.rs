mod image;
mod mem;

use crate::cpu::Opcode;
use crate::{Cpu, Image};

use std::cell::RefCell;
use std::rc::Rc;

/// Encode a standard three register instruction.
pub fn ins(op: u32, a: u32, b: u32, c: u32) -> u32 {
    Opcode::reg(op, a, b, c).as_word()
}

/// Encode a load value instruction.
pub fn loadv(a: u32, value: u32) -> u32 {
    Opcode::load_value(a, value).as_word()
}

/// Build a machine around `program`, with `input` as its input source and a
/// byte vector collecting its output.
pub fn machine(program: &[u32], input: &'static [u8]) -> (Cpu, Rc<RefCell<Vec<u8>>>) {
    let input = Rc::new(RefCell::new(input));
    let output = Rc::new(RefCell::new(Vec::<u8>::new()));

    let cpu = Cpu::new(Image::from_words(program.to_vec()), input, output.clone());
    (cpu, output)
}

/// Run `program` until it halts, feeding it `input`. Returns the finished
/// machine and everything it wrote to the output sink.
pub fn run_code(program: &[u32], input: &'static [u8]) -> (Cpu, Vec<u8>) {
    let (mut cpu, output) = machine(program, input);

    if let Err(trap) = cpu.run() {
        panic!("{trap}");
    }

    let out = output.borrow().clone();
    (cpu, out)
}
