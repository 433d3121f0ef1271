use anchor_lang::solana_program::native_token::LAMPORTS_PER_SOL;

/// 0.01 SOL per tile
pub const DEFAULT_UNIT_PRICE: u64 = LAMPORTS_PER_SOL / 100;

/// Exact payment owed for a batch of `tile_count` tiles.
/// `None` when the product does not fit in a u64.
pub fn batch_cost(tile_count: usize, unit_price: u64) -> Option<u64> {
    u64::try_from(tile_count).ok()?.checked_mul(unit_price)
}
