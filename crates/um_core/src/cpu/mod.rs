//! Emulation of the Universal Machine processor: eight 32-bit registers, a
//! program counter and the 14 instruction ISA, executing out of segment 0.

pub mod opcode;

use crate::image::Image;
use crate::mem::{Memory, PROGRAM};
use crate::{Input, Output};

pub use opcode::{Opcode, RegIdx};

use thiserror::Error;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// A condition that stops the machine before a halt instruction is reached.
///
/// The machine never resumes after a trap; the front reports it and exits
/// non zero.
#[derive(Error, Debug)]
pub enum Trap {
    #[error("illegal opcode {op} at address {addr:#010x}")]
    IllegalOpcode { op: u32, addr: u32 },

    #[error("division by zero at address {addr:#010x}")]
    DivisionByZero { addr: u32 },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

pub struct Cpu {
    /// Offset into segment 0 of the next instruction to fetch. During an
    /// instruction it already points at the successor, which only the load
    /// program instruction overwrites.
    pc: u32,
    /// The eight general purpose registers, all zero at startup.
    registers: [u32; 8],
    /// Set by the halt instruction. Once set no further fetch happens.
    halted: bool,
    /// Instructions dispatched since startup. Reported when halting.
    executed: u64,
    mem: Memory,
    input: Rc<RefCell<dyn Input>>,
    output: Rc<RefCell<dyn Output>>,
}

impl Cpu {
    pub fn new(
        image: Image,
        input: Rc<RefCell<dyn Input>>,
        output: Rc<RefCell<dyn Output>>,
    ) -> Self {
        debug!("program image of {} words bound to segment 0", image.word_len());
        Self {
            pc: 0,
            registers: [0; 8],
            halted: false,
            executed: 0,
            mem: Memory::new(image.into_words()),
            input,
            output,
        }
    }

    pub fn read_reg(&self, idx: RegIdx) -> u32 {
        self.registers[idx.0 as usize]
    }

    fn set_reg(&mut self, idx: RegIdx, value: u32) {
        self.registers[idx.0 as usize] = value;
    }

    pub fn pc(&self) -> u32 {
        self.pc
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn mem(&self) -> &Memory {
        &self.mem
    }

    /// Instructions dispatched so far.
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// Fetch and execute the next instruction.
    pub fn step(&mut self) -> Result<(), Trap> {
        let addr = self.pc;
        let op = Opcode::new(self.mem.get(PROGRAM, addr));

        self.pc = self.pc.wrapping_add(1);
        self.executed += 1;

        if log_enabled!(log::Level::Trace) {
            trace!("{:#010x}: {}", addr, op);
        }

        self.exec(op, addr)
    }

    /// Run until the halt instruction.
    pub fn run(&mut self) -> Result<(), Trap> {
        while !self.halted {
            self.step()?;
        }
        Ok(())
    }

    /// Execute opcode. `addr` is the address the opcode was fetched from,
    /// used only in trap reports.
    fn exec(&mut self, op: Opcode, addr: u32) -> Result<(), Trap> {
        match op.op() {
            0 => self.op_cmov(op),
            1 => self.op_sload(op),
            2 => self.op_sstore(op),
            3 => self.op_add(op),
            4 => self.op_mult(op),
            5 => self.op_div(op, addr),
            6 => self.op_nand(op),
            7 => self.op_halt(),
            8 => self.op_map(op),
            9 => self.op_unmap(op),
            10 => self.op_output(op),
            11 => self.op_input(op),
            12 => self.op_loadp(op),
            13 => self.op_loadv(op),
            op => {
                trace!("illegal opcode {} at {:#010x}", op, addr);
                Err(Trap::IllegalOpcode { op, addr })
            }
        }
    }
}

/// CPU opcode implementation.
impl Cpu {
    /// CMOV - Conditional move.
    fn op_cmov(&mut self, op: Opcode) -> Result<(), Trap> {
        if self.read_reg(op.c()) != 0 {
            self.set_reg(op.a(), self.read_reg(op.b()));
        }
        Ok(())
    }

    /// SLOAD - Segment load.
    fn op_sload(&mut self, op: Opcode) -> Result<(), Trap> {
        let val = self.mem.get(self.read_reg(op.b()), self.read_reg(op.c()));
        self.set_reg(op.a(), val);
        Ok(())
    }

    /// SSTORE - Segment store.
    fn op_sstore(&mut self, op: Opcode) -> Result<(), Trap> {
        self.mem.put(
            self.read_reg(op.a()),
            self.read_reg(op.b()),
            self.read_reg(op.c()),
        );
        Ok(())
    }

    /// ADD - Addition modulo 2^32.
    fn op_add(&mut self, op: Opcode) -> Result<(), Trap> {
        let val = self.read_reg(op.b()).wrapping_add(self.read_reg(op.c()));
        self.set_reg(op.a(), val);
        Ok(())
    }

    /// MULT - Multiplication modulo 2^32.
    fn op_mult(&mut self, op: Opcode) -> Result<(), Trap> {
        let val = self.read_reg(op.b()).wrapping_mul(self.read_reg(op.c()));
        self.set_reg(op.a(), val);
        Ok(())
    }

    /// DIV - Unsigned division. Dividing by zero traps.
    fn op_div(&mut self, op: Opcode, addr: u32) -> Result<(), Trap> {
        let rhs = self.read_reg(op.c());
        if rhs == 0 {
            trace!("division by zero at {:#010x}", addr);
            return Err(Trap::DivisionByZero { addr });
        }
        let val = self.read_reg(op.b()) / rhs;
        self.set_reg(op.a(), val);
        Ok(())
    }

    /// NAND - Bitwise not and.
    fn op_nand(&mut self, op: Opcode) -> Result<(), Trap> {
        let val = !(self.read_reg(op.b()) & self.read_reg(op.c()));
        self.set_reg(op.a(), val);
        Ok(())
    }

    /// HALT - Stop the machine.
    fn op_halt(&mut self) -> Result<(), Trap> {
        self.halted = true;
        debug!("halted after {} instructions", self.executed);
        Ok(())
    }

    /// MAP - Allocate a zero filled segment of RC words, handle into RB.
    fn op_map(&mut self, op: Opcode) -> Result<(), Trap> {
        let handle = self.mem.allocate(self.read_reg(op.c()));
        self.set_reg(op.b(), handle);
        Ok(())
    }

    /// UNMAP - Release the segment at the handle in RC.
    fn op_unmap(&mut self, op: Opcode) -> Result<(), Trap> {
        self.mem.free(self.read_reg(op.c()));
        Ok(())
    }

    /// OUTPUT - Emit the low byte of RC on the output sink.
    fn op_output(&mut self, op: Opcode) -> Result<(), Trap> {
        let val = self.read_reg(op.c()) as u8;
        if let Err(err) = self.output.borrow_mut().write_byte(val) {
            trace!("output sink failed: {}", err);
            return Err(err.into());
        }
        Ok(())
    }

    /// INPUT - Read a byte from the input source into RC. End of input
    /// loads the sentinel `0xffffffff`, which no byte value can produce.
    fn op_input(&mut self, op: Opcode) -> Result<(), Trap> {
        let byte = match self.input.borrow_mut().read_byte() {
            Ok(byte) => byte,
            Err(err) => {
                trace!("input source failed: {}", err);
                return Err(err.into());
            }
        };
        let val = match byte {
            Some(byte) => byte as u32,
            None => u32::MAX,
        };
        self.set_reg(op.c(), val);
        Ok(())
    }

    /// LOADP - Replace the program with a copy of the segment at the handle
    /// in RB, then jump to RC. The copy completes before the jump so the
    /// old program counter never addresses the new image.
    fn op_loadp(&mut self, op: Opcode) -> Result<(), Trap> {
        self.mem.load_program(self.read_reg(op.b()));
        self.pc = self.read_reg(op.c());
        Ok(())
    }

    /// LOADV - Load a 25 bit immediate.
    fn op_loadv(&mut self, op: Opcode) -> Result<(), Trap> {
        self.set_reg(op.imm_reg(), op.imm());
        Ok(())
    }
}
