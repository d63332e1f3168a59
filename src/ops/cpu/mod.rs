//! CPU implementations of the operation traits

mod indexing;
mod matmul;
mod triangular;
mod utility;
