//! Three-address code intermediate representation.
//!
//! The generator walks the analyzed AST and flattens every expression
//! into instructions over temporaries (`t0`, `t1`, ...) and labels
//! (`L0`, `L1`, ...). Both counters are global to one generation run
//! and only ever count up, so each temporary has exactly one defining
//! instruction in the emitted text.
//!
//! The instruction set is a closed enum; backends match on it
//! exhaustively.

pub mod generator;
pub mod tac;

pub use generator::generate;
pub use tac::{Instr, Operand};

#[cfg(test)]
mod tests;
