pub mod executor;
/// Fan-out/fan-in processing engine
pub mod pool;

pub use executor::FileExecutor;
pub use pool::{PoolError, PoolState, WorkerPool};
