// Event loop timing constants
pub const POLL_INTERVAL_MS: u64 = 50;

// Board generation constants
pub const SAFE_ZONE_CELLS: usize = 9; // 3x3 opening around the first reveal
