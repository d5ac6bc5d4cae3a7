//! Domain types for the Vestlock platform.

pub mod claim;
pub mod common;
pub mod investment;
pub mod scheme;
pub mod user;

pub use claim::{ClaimStatus, WithdrawalClaim};
pub use common::{InvestmentId, SchemeId, UserId, WalletRef};
pub use investment::{Investment, InvestmentStatus};
pub use scheme::{Application, ApplicationStatus, Scheme};
pub use user::{AdminProfile, ClientProfile, User};
