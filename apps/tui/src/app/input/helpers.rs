/// Steps `index` one slot through a ring of `len` entries. An empty ring
/// always yields 0.
pub const fn cycle_index(index: usize, len: usize, forward: bool) -> usize {
    match (len, forward) {
        (0, _) => 0,
        (_, true) => (index + 1) % len,
        (_, false) => (index % len + len - 1) % len,
    }
}
