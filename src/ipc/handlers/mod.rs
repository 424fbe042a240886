pub mod admin;
pub mod core;
pub mod events;
pub mod parent;
pub mod registration;
pub mod roles;
pub mod student;
pub mod teacher;
