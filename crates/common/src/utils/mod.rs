pub mod lifecycle;
pub mod logging;
