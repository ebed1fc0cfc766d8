pub mod metrics;
pub mod tracing;

pub use self::metrics::{init_metrics, metrics_middleware, render_metrics};
pub use self::tracing::{request_id_middleware, REQUEST_ID_HEADER};
