pub mod axis;
pub mod marks;
