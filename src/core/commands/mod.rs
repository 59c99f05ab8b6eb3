pub mod hydrogen;
pub mod renumber;
