pub mod holiday;
pub mod personal_date;
pub mod task;
pub mod user;

pub use holiday::*;
pub use personal_date::*;
pub use task::*;
pub use user::*;
