pub mod dtr;
