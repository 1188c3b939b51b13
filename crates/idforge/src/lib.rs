#![doc = include_str!("../README.md")]

mod analysis;
mod base32;
mod batch;
mod error;
mod export;
mod format;
mod identifier;
mod kind;
mod metadata;
mod rand;
mod select;
mod settings;
mod statistics;
mod strategy;
mod time;
mod validation;

pub use crate::analysis::*;
pub use crate::base32::{decode_base32_u64, encode_base32, is_canonical_base32};
pub use crate::batch::*;
pub use crate::error::*;
pub use crate::export::*;
pub use crate::format::*;
pub use crate::identifier::*;
pub use crate::kind::*;
pub use crate::metadata::*;
pub use crate::rand::*;
pub use crate::select::*;
pub use crate::settings::*;
pub use crate::statistics::*;
pub use crate::strategy::*;
pub use crate::time::*;
pub use crate::validation::*;
