pub mod assay;
pub mod controls;
pub mod dataset;
