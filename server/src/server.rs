//! tiny_http front: worker threads pulling from one listener.

use std::sync::Arc;
use std::thread;

use anyhow::Context;
use anyhow::anyhow;
use lexapprox_core::Config;
use lexapprox_core::ModelCatalog;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;
use tracing::info;
use tracing::warn;

use crate::http::HttpRequest;
use crate::http::HttpResponse;
use crate::http::Method;
use crate::router::Router;

/// Bind the configured address and serve until every worker exits.
pub fn run_server(config: &Config, catalog: ModelCatalog) -> anyhow::Result<()> {
    let bind = config.server.bind.as_str();
    let server = Server::http(bind).map_err(|err| anyhow!("failed to bind {bind}: {err}"))?;
    let server = Arc::new(server);
    let router = Arc::new(Router::new(Arc::new(catalog), config));
    let workers = config.server.workers.max(1);
    info!(bind, workers, "HTTP server listening");

    let handles = (0..workers)
        .map(|index| {
            let server = Arc::clone(&server);
            let router = Arc::clone(&router);
            thread::Builder::new()
                .name(format!("lexapprox-http-{index}"))
                .spawn(move || worker_loop(&server, &router))
                .context("failed to spawn HTTP worker")
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow!("HTTP worker panicked"))?;
    }
    Ok(())
}

fn worker_loop(server: &Server, router: &Router) {
    for request in server.incoming_requests() {
        let http_request = to_http_request(&request);
        let response = router.handle(&http_request);
        info!(
            method = %request.method(),
            url = %request.url(),
            status = response.status,
            "request"
        );
        if let Err(err) = request.respond(to_tiny_response(response)) {
            warn!("failed to send response: {err}");
        }
    }
}

fn to_http_request(request: &tiny_http::Request) -> HttpRequest {
    let mut http_request = HttpRequest::new(Method::parse(request.method().as_str()), request.url());
    for header in request.headers() {
        if header.field.equiv("Origin") {
            http_request = http_request.with_origin(header.value.as_str());
        } else if header.field.equiv("Cookie") {
            http_request = http_request.with_cookie_header(header.value.as_str());
        }
    }
    http_request
}

fn to_tiny_response(response: HttpResponse) -> Response<std::io::Cursor<Vec<u8>>> {
    let mut tiny = Response::from_data(response.body).with_status_code(response.status);
    for (name, value) in &response.headers {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => tiny.add_header(header),
            Err(()) => warn!(header = %name, "dropping malformed response header"),
        }
    }
    tiny
}
