pub mod demo_backend;

pub use demo_backend::{Backends, DemoBackend};
