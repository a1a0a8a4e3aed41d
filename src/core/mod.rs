pub mod alignment;
pub mod composition;
pub mod dispatch;
pub mod fasta;
pub mod io;
pub mod model;
pub mod sequence;
