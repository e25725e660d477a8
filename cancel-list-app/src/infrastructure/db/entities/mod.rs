pub mod period;
pub mod vote;

pub use period::Entity as Period;
pub use vote::Entity as Vote;
