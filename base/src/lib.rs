//! The `base` crate defines the mechanism-table things which are
//! useful in both the SCL generator and other associated tools.  The
//! idea is that if you want to write a configuration editor or a
//! standalone checker, it would depend on the base crate but would
//! not need to depend on the generator library itself.

mod addr;
mod error;
mod kind;
mod signal;
mod slot;

pub mod prelude;
