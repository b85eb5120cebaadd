use crate::Memory;

#[test]
fn allocate_zero_fill() {
    let mut mem = Memory::new(vec![]);
    let handle = mem.allocate(4);
    for offset in 0..4 {
        assert_eq!(mem.get(handle, offset), 0);
    }
}

#[test]
fn fresh_handles_count_up() {
    let mut mem = Memory::new(vec![]);
    assert_eq!(mem.allocate(1), 1);
    assert_eq!(mem.allocate(1), 2);
    assert_eq!(mem.allocate(1), 3);
}

#[test]
fn handle_reuse_is_lifo() {
    let mut mem = Memory::new(vec![]);
    let h1 = mem.allocate(1);
    let h2 = mem.allocate(1);

    mem.free(h1);
    mem.free(h2);

    assert_eq!(mem.allocate(1), h2);
    assert_eq!(mem.allocate(1), h1);
}

#[test]
fn reused_segment_zero_filled() {
    let mut mem = Memory::new(vec![]);
    let h1 = mem.allocate(2);
    mem.put(h1, 0, 5);
    mem.put(h1, 1, 6);

    mem.free(h1);

    let h2 = mem.allocate(2);
    assert_eq!(h2, h1);
    assert_eq!(mem.get(h2, 0), 0);
    assert_eq!(mem.get(h2, 1), 0);
}

#[test]
fn reused_handle_takes_new_length() {
    let mut mem = Memory::new(vec![]);
    let h = mem.allocate(1);
    mem.free(h);

    assert_eq!(mem.allocate(3), h);
    assert_eq!(mem.len_of(h), 3);
}

#[test]
fn load_program_is_deep_copy() {
    let mut mem = Memory::new(vec![1, 2, 3]);
    let h = mem.allocate(2);
    mem.put(h, 0, 0xdead);

    mem.load_program(h);

    // Mutating and freeing the source must not touch segment 0.
    mem.put(h, 1, 99);
    mem.free(h);

    assert_eq!(mem.get(0, 0), 0xdead);
    assert_eq!(mem.get(0, 1), 0);
    assert_eq!(mem.len_of(0), 2);
}

#[test]
fn load_program_zero_is_noop() {
    let mut mem = Memory::new(vec![42]);
    mem.load_program(0);
    assert_eq!(mem.get(0, 0), 42);
    assert_eq!(mem.len_of(0), 1);
}
