pub mod mapping;
pub mod numeric;
