pub mod cli;
pub mod connection;
pub mod convert;
pub mod printer;
pub mod repo;
pub mod validation;
