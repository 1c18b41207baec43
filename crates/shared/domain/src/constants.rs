//! Domain-level constants.
//!
//! These constants define the fixed security parameters of the identity core.

// =============================================================================
// Password hashing
// =============================================================================

/// Argon2id memory cost in KiB.
///
/// Together with the two values below this is the fixed work factor for
/// every stored password hash. It is not tunable per call.
pub const ARGON2_MEMORY_KIB: u32 = 19_456;

/// Argon2id iteration count.
pub const ARGON2_ITERATIONS: u32 = 2;

/// Argon2id degree of parallelism.
pub const ARGON2_PARALLELISM: u32 = 1;

// =============================================================================
// Authentication
// =============================================================================

/// Default token validity when none is configured.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Claim names carried by every issued token.
pub const CLAIM_USER_ID: &str = "uid";
pub const CLAIM_EMAIL: &str = "email";
pub const CLAIM_APP_ID: &str = "app_id";
pub const CLAIM_EXPIRY: &str = "exp";
