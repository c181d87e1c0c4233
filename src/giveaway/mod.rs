pub mod announcer;
pub mod eligibility;
pub mod lifecycle;
pub mod recovery;
pub mod render;
pub mod sampler;
pub mod timers;
