//! Worker configuration assembly
//!
//! A worker is started as `<base-properties-file> [--override key=value]...`.
//! The base file is loaded and overrides are layered on top of it.

pub mod overrides;

pub use overrides::{merge_overrides, parse_overrides, props_from_args, Override, OVERRIDE_FLAG};
