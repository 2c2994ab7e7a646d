pub mod advantage;
pub mod business;
pub mod department;
pub mod institution;

pub use advantage::{Advantage, AdvantageInput};
pub use business::Business;
pub use department::{Department, DepartmentInput};
pub use institution::Institution;
