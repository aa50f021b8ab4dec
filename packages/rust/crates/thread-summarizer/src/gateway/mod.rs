//! Gateway namespace: HTTP entrypoint.

mod http;

pub use http::{
    DEFAULT_REQUEST_TIMEOUT_SECS, GatewayHealthResponse, GatewayState, LabeledSummariesResponse,
    SummarizeUrlQuery, SummarizeUrlResponse, router, run_http,
};
