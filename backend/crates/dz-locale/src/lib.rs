//! Algerian display-formatting conventions.
//!
//! Takwin serves an Algerian audience, and every display string the
//! platform renders (course prices, start dates, contact numbers) must read
//! the same regardless of which surface asks for it. This crate holds those
//! conventions as pure functions so the HTTP adapter, seed tooling, and
//! tests all agree on the rendered text.
//!
//! All functions are total: malformed input passes through unchanged rather
//! than failing.
//!
//! # Examples
//!
//! ```
//! use dz_locale::{format_dzd, format_phone};
//!
//! assert_eq!(format_phone("213512345678"), "+213 5 12 34 56 78");
//! assert_eq!(format_dzd(1_500_000), "15 000,00 DA");
//! ```

pub mod date;
pub mod money;
pub mod phone;

pub use date::format_date;
pub use money::{format_dzd, group_digits};
pub use phone::format_phone;
