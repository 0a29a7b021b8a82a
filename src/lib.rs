#![cfg_attr(doc, doc = include_str!("../README.md"))]

pub mod chart;
pub mod error;
pub mod feed;
pub(crate) mod serde_helpers;
pub mod types;
#[cfg(feature = "ws")]
pub mod ws;

use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;
