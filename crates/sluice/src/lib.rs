#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod accumulator;
mod config;
mod error;
pub mod pipeline;
mod report;
mod stop;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::report::*;
pub use crate::stop::*;
