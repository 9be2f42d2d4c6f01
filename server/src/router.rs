use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Duration;
use std::time::Instant;

use chrono::Local;
use lexapprox_core::Config;
use lexapprox_core::EngineConfig;
use lexapprox_core::ModelCatalog;
use lexapprox_core::Session;
use lexapprox_core::StartView;
use lexapprox_persistence::ExportError;
use lexapprox_persistence::ResultsExporter;
use lexapprox_persistence::ResultsReport;
use lexapprox_plot::SpaceProjection;
use lexapprox_plot::render_space_plot;
use lexapprox_plot::render_trajectory;
use tracing::debug;
use tracing::info;
use tracing::warn;
use uuid::Uuid;

use crate::error::Result;
use crate::error::ServerError;
use crate::http::HttpRequest;
use crate::http::HttpResponse;
use crate::http::Method;
use crate::http::SESSION_COOKIE;
use crate::store::SessionSlot;
use crate::store::SessionStore;
use crate::store::lock_slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Models,
    Suggestions,
    Undo,
    Plot,
    Done,
    ResultPlot,
    SaveResults,
}

impl Route {
    fn parse(path: &str) -> Option<Self> {
        let route = match path.trim_end_matches('/') {
            "/models" => Route::Models,
            "/suggestions" => Route::Suggestions,
            "/undo" => Route::Undo,
            "/plot" => Route::Plot,
            "/done" => Route::Done,
            "/result-plot" => Route::ResultPlot,
            "/save-results" => Route::SaveResults,
            _ => return None,
        };
        Some(route)
    }
}

/// Maps requests onto game sessions. Shared by every worker thread.
pub struct Router {
    catalog: Arc<ModelCatalog>,
    engine: EngineConfig,
    store: SessionStore,
    projections: Mutex<HashMap<u32, Arc<SpaceProjection>>>,
    exporter: ResultsExporter,
}

impl Router {
    pub fn new(catalog: Arc<ModelCatalog>, config: &Config) -> Self {
        Self {
            catalog,
            engine: config.engine,
            store: SessionStore::new(
                Duration::from_secs(config.server.session_ttl_secs),
                config.server.max_sessions,
            ),
            projections: Mutex::new(HashMap::new()),
            exporter: ResultsExporter::new(config.export.results_dir.clone()),
        }
    }

    pub fn handle(&self, request: &HttpRequest) -> HttpResponse {
        self.handle_at(request, Instant::now())
    }

    /// Like [`Router::handle`] with an explicit clock for session expiry.
    pub fn handle_at(&self, request: &HttpRequest, now: Instant) -> HttpResponse {
        let mut response = self.dispatch(request, now);
        apply_cors(request, &mut response);
        response
    }

    pub fn live_sessions(&self) -> usize {
        self.store.len()
    }

    fn dispatch(&self, request: &HttpRequest, now: Instant) -> HttpResponse {
        match &request.method {
            Method::Options => return HttpResponse::no_content(),
            Method::Get => {}
            Method::Other(method) => {
                return reject(request, ServerError::MethodNotAllowed(method.clone()));
            }
        }
        let Some(route) = Route::parse(&request.path) else {
            return reject(request, ServerError::RouteNotFound(request.path.clone()));
        };
        if route == Route::Models && request.param("id").is_none() {
            return HttpResponse::json(&self.catalog.summaries());
        }

        let (session_id, slot) = self.store.checkout(request.session_id, now);
        let mut slot = lock_slot(&slot);
        let result = match route {
            Route::Models => self.handle_select_model(request, &mut slot),
            Route::Suggestions => self.handle_suggestions(request, &mut slot),
            Route::Undo => self.handle_undo(&mut slot),
            Route::Plot => self.handle_plot(&mut slot),
            Route::Done => self.handle_done(&mut slot),
            Route::ResultPlot => self.handle_result_plot(request, &mut slot),
            Route::SaveResults => self.handle_save_results(&mut slot),
        };
        let mut response = result.unwrap_or_else(|err| reject(request, err));
        if request.session_id != Some(session_id) {
            response.push_header("Set-Cookie", session_cookie(session_id));
        }
        response
    }

    fn handle_select_model(&self, request: &HttpRequest, slot: &mut SessionSlot) -> Result<HttpResponse> {
        let raw = request.param("id").ok_or(ServerError::MissingParameter("id"))?;
        let id: u32 = raw.parse().map_err(|_| ServerError::InvalidParameter {
            name: "id",
            value: raw.to_string(),
        })?;
        if self.catalog.get(id).is_none() {
            return Err(ServerError::UnknownModel(id));
        }
        slot.model_id = Some(id);
        slot.reset_game();
        debug!(model = id, "model selected");
        Ok(HttpResponse::json(&"OK"))
    }

    fn handle_suggestions(&self, request: &HttpRequest, slot: &mut SessionSlot) -> Result<HttpResponse> {
        match request.param("item") {
            Some(item) if slot.game.is_some() => {
                if item.is_empty() {
                    return Err(ServerError::InvalidParameter {
                        name: "item",
                        value: String::new(),
                    });
                }
                let game = slot.game.as_mut().ok_or(ServerError::NoGame)?;
                Ok(HttpResponse::json(&game.select_and_suggest(item)?))
            }
            _ => {
                let model_id = slot.model_id.ok_or(ServerError::NoModelSelected)?;
                let model = self
                    .catalog
                    .get(model_id)
                    .ok_or(ServerError::UnknownModel(model_id))?;
                let mut game = Session::from_os_rng(Arc::clone(&model.space), self.engine);
                let items = game.start_items()?.to_vec();
                slot.reset_game();
                slot.game = Some(game);
                info!(model = model_id, "new game started");
                Ok(HttpResponse::json(&StartView { items }))
            }
        }
    }

    fn handle_undo(&self, slot: &mut SessionSlot) -> Result<HttpResponse> {
        let game = slot.game.as_mut().ok_or(ServerError::NoGame)?;
        Ok(HttpResponse::json(&game.undo_view()?))
    }

    fn handle_plot(&self, slot: &mut SessionSlot) -> Result<HttpResponse> {
        let model_id = slot.model_id.ok_or(ServerError::NoModelSelected)?;
        let game = slot.game.as_ref().ok_or(ServerError::NoGame)?;
        let projection = self.projection(model_id, game)?;
        let round = game.current_round().unwrap_or_default();
        let png = render_space_plot(&projection, round, game.selected_item())?;
        Ok(HttpResponse::png(png))
    }

    fn handle_done(&self, slot: &mut SessionSlot) -> Result<HttpResponse> {
        let game = slot.game.as_ref().ok_or(ServerError::NoGame)?;
        Ok(HttpResponse::json(&game.done_view()))
    }

    /// Reveal the target and chart the game. Asking again for the same
    /// target returns the stored chart.
    fn handle_result_plot(&self, request: &HttpRequest, slot: &mut SessionSlot) -> Result<HttpResponse> {
        let target = request.param("item").ok_or(ServerError::MissingParameter("item"))?;
        let game = slot.game.as_mut().ok_or(ServerError::NoGame)?;

        if let Some(analytics) = game.analytics()
            && analytics.target == target
            && let Some(png) = &slot.result_plot
        {
            return Ok(HttpResponse::png(png.clone()));
        }

        let analytics = game.reveal(target)?;
        let png = render_trajectory(analytics)?;
        info!(target, iterations = analytics.iterations(), "target revealed");
        slot.result_plot = Some(png.clone());
        Ok(HttpResponse::png(png))
    }

    fn handle_save_results(&self, slot: &mut SessionSlot) -> Result<HttpResponse> {
        let game = slot.game.as_ref().ok_or(ServerError::NoGame)?;
        let png = slot.result_plot.as_deref().ok_or(ExportError::NotRevealed)?;
        let report = ResultsReport::from_session(game, Local::now().fixed_offset())?;
        self.exporter.export(&report, png)?;
        Ok(HttpResponse::json(&"OK"))
    }

    /// PCA of the model's space, fitted on first use. The fit runs without
    /// the cache lock held; if two requests race, the first insert wins.
    fn projection(&self, model_id: u32, game: &Session) -> Result<Arc<SpaceProjection>> {
        if let Some(projection) = self.lock_projections().get(&model_id) {
            return Ok(Arc::clone(projection));
        }
        let fitted = Arc::new(SpaceProjection::fit(game.space())?);
        info!(model = model_id, "space projection fitted");
        let projection = self
            .lock_projections()
            .entry(model_id)
            .or_insert(fitted)
            .clone();
        Ok(projection)
    }

    fn lock_projections(&self) -> MutexGuard<'_, HashMap<u32, Arc<SpaceProjection>>> {
        self.projections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn cached_projections(&self) -> usize {
        self.lock_projections().len()
    }
}

fn reject(request: &HttpRequest, err: ServerError) -> HttpResponse {
    if err.status() >= 500 {
        warn!(path = %request.path, error = %err, "request failed");
    } else {
        debug!(path = %request.path, error = %err, "request rejected");
    }
    HttpResponse::from_error(&err)
}

fn session_cookie(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// Reflect the caller's origin so browsers accept credentialed requests.
fn apply_cors(request: &HttpRequest, response: &mut HttpResponse) {
    let Some(origin) = request.origin.as_deref() else {
        return;
    };
    response.push_header("Access-Control-Allow-Origin", origin);
    response.push_header("Access-Control-Allow-Credentials", "true");
    response.push_header("Vary", "Origin");
    if request.method == Method::Options {
        response.push_header("Access-Control-Allow-Methods", "GET, OPTIONS");
        response.push_header("Access-Control-Allow-Headers", "Content-Type");
    }
}
