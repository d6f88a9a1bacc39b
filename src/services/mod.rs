pub mod forwarding;
pub mod relay;
pub mod seed;
