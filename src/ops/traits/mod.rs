//! Operation traits implemented by each runtime client

mod indexing;
mod matmul;
mod triangular;
mod utility;

pub use indexing::IndexingOps;
pub use matmul::MatmulOps;
pub use triangular::TriangularOps;
pub use utility::UtilityOps;
