pub mod logging;
pub mod metrics;
pub mod trace_context;

pub use self::logging::init_tracing;
pub use self::metrics::{get_metrics, init_metrics};
pub use self::trace_context::{
    TRACEPARENT_HEADER, TRACESTATE_HEADER, TracedClientExt, TracedRequest, inject_trace_context,
};
