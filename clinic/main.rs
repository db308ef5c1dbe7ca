/// leaf-health Clinic
///
/// Browser demo for the leaf-health heuristics.  Upload a leaf photo and get
/// the predicted class, per-class probabilities, a care tip and the extracted
/// features.  Served by a synchronous tiny_http server.
///
/// Run with:
///   cargo run --bin clinic --release
/// Then open http://127.0.0.1:7878
///
/// Environment:
///   LEAF_HEALTH_ADDR      bind address (default 127.0.0.1:7878)
///   LEAF_HEALTH_CONFIG    optional ExtractorConfig JSON file
///   RUST_LOG              log filter, e.g. `info` or `leaf_health=debug`

mod state;
mod render;
mod routes;
mod handlers;
mod util;

use std::sync::Arc;
use tiny_http::Server;

use state::ClinicState;

const DEFAULT_ADDR: &str = "127.0.0.1:7878";

fn main() {
    env_logger::init();

    let addr = std::env::var("LEAF_HEALTH_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_owned());
    let state = match std::env::var("LEAF_HEALTH_CONFIG") {
        Ok(path) => match ClinicState::from_config_file(&path) {
            Ok(s)  => s,
            Err(e) => {
                eprintln!("could not load config '{}': {}", path, e);
                std::process::exit(2);
            }
        },
        Err(_) => ClinicState::default(),
    };

    let server = match Server::http(&addr) {
        Ok(s)  => s,
        Err(e) => {
            eprintln!("failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    log::info!("extractor config: {:?}", state.extractor);
    println!("leaf-health clinic listening on http://{}", addr);

    // Read-only state; each request is handled on its own thread.
    let shared = Arc::new(state);
    for request in server.incoming_requests() {
        let state = Arc::clone(&shared);
        std::thread::spawn(move || {
            routes::dispatch(request, state);
        });
    }
}
