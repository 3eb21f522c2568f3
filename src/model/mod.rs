//! Wire types (DTOs) exchanged with the backend services, plus the guest cart record.

pub mod account;
pub mod cart;
pub mod datetime;
pub mod drone;
pub mod order;
pub mod payment;
pub mod rating;
pub mod role;
pub mod shipping;

pub use account::*;
pub use cart::*;
pub use drone::*;
pub use order::*;
pub use payment::*;
pub use rating::*;
pub use role::*;
pub use shipping::*;
