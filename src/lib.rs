// studyhall - Single-session study planner
// Library exports

pub mod cli;
pub mod config;
pub mod executor;
pub mod logging;
pub mod planner;
pub mod retrieval;
pub mod server;
pub mod tasks;
