pub mod scan;
pub mod ui;
