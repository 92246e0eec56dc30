//! Business logic services for admin.
//!
//! # Services
//!
//! - `editor` - Product edit sessions (load, apply messages, save)
//! - `pos` - POS cart, coupon and customer quick-add

pub mod editor;
pub mod pos;

pub use editor::ProductEditor;
pub use pos::{OrderReceipt, PosSession};
