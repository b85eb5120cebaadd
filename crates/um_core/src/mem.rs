//! The segmented memory of the Universal Machine.

/// Handle of the segment holding the running program.
pub const PROGRAM: u32 = 0;

/// All memory owned by the machine: a dense table of word segments indexed
/// by handle, and a pool of freed handles ready for reuse.
///
/// Handles are plain indices into the table, never pointers. A freed slot
/// keeps its entry but drops its storage; the handle waits in `free` until
/// `allocate` hands it out again, so the handle space stays compact. Handle
/// 0 always holds the program image.
pub struct Memory {
    segments: Vec<Vec<u32>>,
    free: Vec<u32>,
}

impl Memory {
    /// Create the memory with `program` bound to segment 0.
    pub fn new(program: Vec<u32>) -> Self {
        Self {
            segments: vec![program],
            free: Vec::new(),
        }
    }

    /// Read the word at `offset` in the segment at `handle`.
    ///
    /// Panics if the handle is dead or the offset is past the segment's
    /// end, both of which a well formed program never does.
    #[inline]
    pub fn get(&self, handle: u32, offset: u32) -> u32 {
        self.segments[handle as usize][offset as usize]
    }

    /// Overwrite the word at `offset` in the segment at `handle`.
    ///
    /// Same preconditions as [`get`](Self::get).
    #[inline]
    pub fn put(&mut self, handle: u32, offset: u32, val: u32) {
        self.segments[handle as usize][offset as usize] = val;
    }

    /// Allocate a zero filled segment of `len` words and return its handle.
    ///
    /// The most recently freed handle is reused if there is one, otherwise
    /// the table grows by a slot.
    pub fn allocate(&mut self, len: u32) -> u32 {
        match self.free.pop() {
            Some(handle) => {
                self.segments[handle as usize] = vec![0; len as usize];
                handle
            }
            None => {
                self.segments.push(vec![0; len as usize]);
                (self.segments.len() - 1) as u32
            }
        }
    }

    /// Release the segment at `handle` and recycle the handle.
    ///
    /// The caller must not free handle 0 or a handle that is already dead.
    pub fn free(&mut self, handle: u32) {
        self.segments[handle as usize] = Vec::new();
        self.free.push(handle);
    }

    /// Replace segment 0 with a copy of the segment at `handle`.
    ///
    /// The copy owns its own storage, so freeing or mutating the source
    /// right after leaves the program unaffected. Segment 0's length
    /// becomes the source's length. Loading from segment 0 itself is a
    /// no-op: the program keeps executing from its own image.
    pub fn load_program(&mut self, handle: u32) {
        if handle == PROGRAM {
            return;
        }
        let image = self.segments[handle as usize].clone();
        self.segments[PROGRAM as usize] = image;
    }

    /// Word length of the segment at `handle`. UM programs can't observe
    /// this; the front and tests can.
    pub fn len_of(&self, handle: u32) -> usize {
        self.segments[handle as usize].len()
    }
}
