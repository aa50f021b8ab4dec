mod gateway;
mod oneshot;

pub(crate) use gateway::run_gateway_mode;
pub(crate) use oneshot::{run_labeled_mode, run_thread_mode};
