//! Switchyard Core Library
//!
//! This crate parses flat command-line argument vectors (`argv`) into named,
//! validated values. Callers register arguments as alias groups
//! (`--verbose`/`-v`) with one validation function each; parsing cuts the
//! token sequence into per-argument groups, dispatches each group to its
//! validator, and keeps both the raw token grouping and the typed results
//! for lookup afterwards.
//!
//! # Key Features
//!
//! - **Alias groups**: any number of spellings per argument, resolved to the
//!   first-registered primary name, matched case-insensitively by default
//! - **Caller-supplied validators**: each argument decides how its tokens
//!   parse and what type comes out
//! - **Raw and typed stores**: the literal token grouping survives parsing
//!   alongside the validated values
//! - **Checked typed lookup**: runtime downcasts that fall back to a caller
//!   default instead of failing
//!
//! # Examples
//!
//! ```
//! use switchyard_core::table::ArgumentTable;
//! use switchyard_core::validators;
//!
//! let mut table = ArgumentTable::new(["--", "-"])?;
//! table.register(validators::joined(", "), &[""])?;
//! table.register(validators::int_in_range(1..=3, 1), &["--verbose", "-v"])?;
//! table.parse(["input.txt", "-v", "2"])?;
//!
//! assert_eq!(table.value_as::<String>(""), Some(&"input.txt".to_string()));
//! assert_eq!(table.value_or("-v", 0i64), 2);
//! # Ok::<(), switchyard_core::error::Error>(())
//! ```

pub mod error;
pub mod table;
pub mod validators;
