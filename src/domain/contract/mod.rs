// Contract domain module

#![allow(clippy::module_inception)]

pub mod contract;
pub mod value_objects;

pub use contract::{max_salary, Contract, ContractTerms};
pub use value_objects::ContractType;
