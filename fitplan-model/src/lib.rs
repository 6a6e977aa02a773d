pub mod biometrics;
pub mod calculator;
pub mod generated;
pub mod log;
pub mod plan;
pub mod request;
pub mod subscription;
