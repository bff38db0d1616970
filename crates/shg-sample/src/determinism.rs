use shg_core::derive_substream_seed;

/// Derives the deterministic seed used for draw number `draw_index`.
pub fn draw_seed(master_seed: u64, draw_index: u64) -> u64 {
    derive_substream_seed(master_seed, draw_index)
}
