// HTTP handlers, one module per resource

pub mod auth;
pub mod companies;
pub mod contracts;
pub mod dashboard;
pub mod users;
pub mod vacations;
