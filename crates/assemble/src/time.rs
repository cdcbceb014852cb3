/// Unix timestamp of the client epoch, 2000-01-01T00:00:00Z.
const CLIENT_EPOCH_UNIX: i64 = 946_684_800;

/// Converts unix seconds to the on-disk timestamp unit: whole minutes since
/// the client epoch, truncating.
#[must_use]
pub fn encode_timestamp(unix_seconds: i64) -> u32 {
    ((unix_seconds - CLIENT_EPOCH_UNIX) / 60) as u32
}
