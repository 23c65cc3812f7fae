use std::{convert::Infallible, net::SocketAddr, str::FromStr};

use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server};
use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};
use prometheus::{Encoder, TextEncoder};
use tracing::{info, trace};

use crate::tracker::{Decision, Outcome};
use crate::Result;

lazy_static! {
    static ref OUTCOMES: IntCounterVec = register_int_counter_vec!(
        "onboarding_outcomes",
        "Number of events handled, by outcome",
        &["outcome"]
    )
    .unwrap();
    pub static ref EVENT_ERRORS: IntCounter = register_int_counter!(
        "onboarding_event_errors",
        "Number of events that failed with an error"
    )
    .unwrap();
}

pub fn record(outcome: &Outcome) {
    OUTCOMES.with_label_values(&[label(outcome)]).inc();
}

fn label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Started { .. } => "started",
        Outcome::FormPresented { .. } => "form_presented",
        Outcome::Submitted => "submitted",
        Outcome::Invalid(_) => "invalid",
        Outcome::Decided {
            decision: Decision::Claim,
            ..
        } => "claimed",
        Outcome::Decided {
            decision: Decision::Accept,
            ..
        } => "accepted",
        Outcome::Decided {
            decision: Decision::Reject,
            ..
        } => "rejected",
        Outcome::Denied => "denied",
        Outcome::Ignored(_) => "ignored",
    }
}

pub async fn start_server(server_addr: &str) -> Result<()> {
    let addr = SocketAddr::from_str(server_addr)?;

    let make_svc = make_service_fn(|_conn| async { Ok::<_, Infallible>(service_fn(handle)) });

    let server = Server::bind(&addr).serve(make_svc);

    info!("Starting metrics server on {addr}");
    server.await?;

    Ok(())
}

async fn handle(_: Request<Body>) -> Result<Response<Body>, prometheus::Error> {
    trace!("Received metrics request");

    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    encoder.encode(&prometheus::gather(), &mut buffer)?;

    Ok(Response::new(Body::from(buffer)))
}
