/// Unique identifier for a player.
pub type PlayerId = u64;
