pub mod combinatorics;
pub mod composition;
pub mod pmf;
pub mod roller;
