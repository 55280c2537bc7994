pub mod calculate;
pub mod invest;
pub mod offers;
pub mod scenario;
