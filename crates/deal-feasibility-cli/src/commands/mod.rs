pub mod feasibility;
pub mod narrative;
pub mod sensitivity;
