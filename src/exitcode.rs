/// Standard Unix exit codes for the ollo CLI.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error or failed command - invalid arguments,
/// unreachable server, bad server response, etc.
pub const USAGE: i32 = 64;
