pub mod app;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod solvers;
