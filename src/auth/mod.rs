/// Credential lifecycle module
///
/// Password hashing, token encoding/decoding, token issuance, and the
/// session lifecycle composing them over the injected repositories.

mod claims;
mod codec;
mod issuer;
mod password;
mod session;

pub use claims::Claims;
pub use claims::TokenType;
pub use codec::TokenCodec;
pub use codec::TokenError;
pub use issuer::IssuedRefresh;
pub use issuer::TokenIssuer;
pub use password::hash_password;
pub use password::verify_password;
pub use session::SessionLifecycle;
pub use session::TokenPair;
