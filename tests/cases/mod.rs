pub mod acyclic;
pub mod ionic;
pub mod rings;
