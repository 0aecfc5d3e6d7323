pub mod bindings;
pub mod catalog;
pub mod instances;
pub mod last_operation;
