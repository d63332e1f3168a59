//! Algorithm contracts for runtime backends
//!
//! Algorithms are defined as traits here and implemented per runtime client,
//! with the backend-independent parts written once as generic functions.

pub mod linalg;
