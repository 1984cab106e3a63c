pub mod communication;
pub mod customer;
pub mod file;
pub mod shared;
pub mod statistics;
