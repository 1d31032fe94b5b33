pub mod orders;
pub mod products;

/// Width of the `VARCHAR(255)` text columns.
pub const MAX_TEXT_LEN: usize = 255;
/// Width of the `VARCHAR(36)` id columns.
pub const MAX_ID_LEN: usize = 36;

/// Postgres measures `VARCHAR(n)` in characters, not bytes.
pub(crate) fn exceeds(value: &str, max: usize) -> bool {
    value.chars().count() > max
}
