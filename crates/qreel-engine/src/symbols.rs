//! Reel display symbols.

/// The 8 display symbols, one per possible 3-bit outcome.
///
/// Per-reel display uses only two of these (see [`symbol_for_bit`]) while
/// the full set is reported by the info endpoint and indexes the 8-outcome
/// distribution.
pub const SYMBOLS: [&str; 8] = ["🍒", "🍋", "🍊", "🍇", "⭐", "💎", "7️⃣", "🔔"];

/// Index offset applied per 1-bit: half the symbol set.
const SYMBOL_OFFSET: usize = SYMBOLS.len() / 2;

/// Map one measured bit to its display symbol.
///
/// Bit 0 → `SYMBOLS[0]`, bit 1 → `SYMBOLS[4]`, via index arithmetic modulo
/// the set length. Deterministic.
pub fn symbol_for_bit(bit: u8) -> &'static str {
    SYMBOLS[(bit as usize * SYMBOL_OFFSET) % SYMBOLS.len()]
}

/// Map a sequence of measured bits to display symbols, one per reel.
pub fn symbols_for(bits: &[u8]) -> Vec<&'static str> {
    bits.iter().map(|&bit| symbol_for_bit(bit)).collect()
}
