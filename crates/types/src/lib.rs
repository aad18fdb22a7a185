pub mod denom;
pub mod route;
pub mod token;

pub use denom::*;
pub use route::*;
pub use token::*;

/// Port used by ICS-20 token transfers unless a channel says otherwise.
pub const TRANSFER_PORT: &str = "transfer";

/// Default slippage tolerance applied to broker quotes, in basis points.
pub const DEFAULT_SLIPPAGE_BPS: u32 = 100;
