//! Mathematical primitives for SCPN Fission Kernels.

pub mod fd;
pub mod interp;
