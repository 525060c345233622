pub mod errors;
pub mod observation;
pub mod ordering;
pub mod policy;
