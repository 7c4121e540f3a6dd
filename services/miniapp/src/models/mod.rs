//! Wire types for the entities the client consumes
//!
//! All of these are owned by the backend; the client only holds transient
//! per-page copies fetched on demand.

mod order;
mod product;
mod push;
mod user;

pub use order::{Order, OrderReport, OrderStatus, OrderUser};
pub use product::{Category, PayoutTime, Product, ProductStatus};
pub use push::{Push, PushActivation};
pub use user::{BlacklistEntry, SellerBalance, User, UserRole};
