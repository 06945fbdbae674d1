// Core modules implementing path resolution, typed access, and error modeling.
pub mod access;
pub mod error;
pub mod mutate;
pub mod path;
pub mod resolve;
pub mod store;
