//! Fission-source residual and Jacobian kernel for multigroup diffusion.
//!
//! Stage 1: per-point kernel, term trait, coupling dispatch
//! Stage 2: material properties, group-constant library, Jacobian verification

pub mod coupling;
pub mod jacobian;
pub mod kernel;
pub mod properties;
pub mod term;
pub mod xs;
