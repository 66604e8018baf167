// Vacation domain module

#![allow(clippy::module_inception)]

pub mod vacation;
pub mod value_objects;

pub use vacation::{Vacation, VacationChanges};
pub use value_objects::VacationStatus;
