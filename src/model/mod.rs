pub mod attendance;
pub mod policy;
