#![allow(non_snake_case)]

pub mod envelope;
pub mod session;
pub mod user;
pub mod validators;

pub use envelope::*;
pub use session::{MemoryTokenStore, Session, TokenStore, TOKEN_KEY};
pub use user::*;
