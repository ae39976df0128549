//! Single binary web server: draw, manual draw, group standings and knockout bracket via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, STATE_PATH (persisted state file), DRAW_DELAY_MS.

use actix_web::{
    get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::sync::RwLock;
use world_cup_draw::config::Config;
use world_cup_draw::logic::{draw_stats, generate_draw, to_csv, to_json, to_text};
use world_cup_draw::{
    begin_bracket, record_winner, AppState, DrawStep, GroupLabel, GroupSource, MatchId,
    Pots, Round, Standings, StateStore, Team,
};

/// In-memory state plus the file it is persisted to. One active tournament.
struct Session {
    state: AppState,
    store: StateStore,
    pots: Pots,
}

impl Session {
    /// Persist after a mutation. The in-memory state stays authoritative if the write fails.
    fn save(&mut self) {
        self.state.touch();
        if let Err(e) = self.store.save(&self.state) {
            log::error!("Failed to save state to {}: {}", self.store.path().display(), e);
        }
    }

    fn team(&self, name: &str) -> Result<Team, HttpResponse> {
        self.pots
            .find(name)
            .cloned()
            .ok_or_else(|| bad_request(format!("Unknown team: {}", name)))
    }
}

type AppData = Data<RwLock<Session>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct PlacementBody {
    team: String,
    group: GroupLabel,
    slot: usize,
}

#[derive(Deserialize)]
struct CommitGroupsBody {
    source: GroupSource,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum MoveDirection {
    Up,
    Down,
}

#[derive(Deserialize)]
struct MoveTeamBody {
    group: GroupLabel,
    index: usize,
    direction: MoveDirection,
}

#[derive(Deserialize, Default)]
struct BeginBracketBody {
    /// Falls back to the standings edited through /standings/move.
    #[serde(default)]
    standings: Option<Standings>,
}

#[derive(Deserialize)]
struct RecordWinnerBody {
    round: Round,
    #[serde(default)]
    match_id: Option<MatchId>,
    team: String,
}

#[derive(Deserialize)]
struct ExportPath {
    format: String,
}

fn bad_request(message: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message.to_string() }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "world-cup-draw",
    })
}

#[get("/api/state")]
async fn api_get_state(data: AppData) -> HttpResponse {
    match data.read() {
        Ok(g) => HttpResponse::Ok().json(&g.state),
        Err(_) => lock_error(),
    }
}

#[get("/api/pots")]
async fn api_get_pots(data: AppData) -> HttpResponse {
    match data.read() {
        Ok(g) => HttpResponse::Ok().json(&g.pots),
        Err(_) => lock_error(),
    }
}

/// Run the automatic draw. The result is computed up front; the delay is cosmetic.
#[post("/api/draw")]
async fn api_generate_draw(data: AppData, config: Data<Config>) -> HttpResponse {
    let draw = {
        let mut g = match data.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        g.state.step = DrawStep::Drawing;
        g.save();
        generate_draw(&g.pots)
    };
    if draw.used_fallback {
        log::warn!(
            "Draw {} used the fallback pass ({} confederation violation(s))",
            draw.id,
            draw.violations.len()
        );
    }

    tokio::time::sleep(config.draw_delay).await;

    let mut g = match data.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.state.set_draw(draw);
    g.save();
    HttpResponse::Ok().json(&g.state.draw)
}

#[post("/api/draw/reset")]
async fn api_reset_draw(data: AppData) -> HttpResponse {
    let mut g = match data.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let session = &mut *g;
    session.state.reset_draw(&session.pots);
    session.save();
    HttpResponse::Ok().json(&session.state)
}

#[get("/api/draw/stats")]
async fn api_draw_stats(data: AppData) -> HttpResponse {
    let g = match data.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.state.current_groups() {
        Some(groups) => HttpResponse::Ok().json(draw_stats(groups)),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No draw" })),
    }
}

/// Export the draw as json, text or csv.
#[get("/api/draw/export/{format}")]
async fn api_export_draw(data: AppData, path: Path<ExportPath>) -> HttpResponse {
    let g = match data.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let groups = match g.state.current_groups() {
        Some(groups) => groups,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No draw" })),
    };
    let date = g.state.export_date();
    match path.format.as_str() {
        "json" => match to_json(groups, date) {
            Ok(body) => HttpResponse::Ok().content_type("application/json").body(body),
            Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
        },
        "text" => match to_text(groups, date) {
            Ok(body) => HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(body),
            Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
        },
        "csv" => match to_csv(groups) {
            Ok(body) => HttpResponse::Ok().content_type("text/csv").body(body),
            Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
        },
        other => bad_request(format!("Unknown export format: {}", other)),
    }
}

/// Manual draw session with the current pot's remaining teams.
#[get("/api/manual")]
async fn api_get_manual(data: AppData) -> HttpResponse {
    let g = match data.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(serde_json::json!({
        "draw": &g.state.manual,
        "progress": g.state.manual.progress(),
        "remaining": g.state.manual.remaining(&g.pots),
        "complete": g.state.manual.is_complete(),
    }))
}

/// Hover feedback: would this placement be accepted?
#[post("/api/manual/validate")]
async fn api_validate_placement(data: AppData, body: Json<PlacementBody>) -> HttpResponse {
    let g = match data.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let team = match g.team(&body.team) {
        Ok(team) => team,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(g.state.manual.validate(&team, body.group, body.slot))
}

#[post("/api/manual/place")]
async fn api_place_team(data: AppData, body: Json<PlacementBody>) -> HttpResponse {
    let mut g = match data.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let team = match g.team(&body.team) {
        Ok(team) => team,
        Err(resp) => return resp,
    };
    match g.state.manual.place(&team, body.group, body.slot) {
        Ok(()) => {
            g.save();
            HttpResponse::Ok().json(&g.state.manual)
        }
        Err(e) => bad_request(e),
    }
}

#[post("/api/manual/next-pot")]
async fn api_next_pot(data: AppData) -> HttpResponse {
    let mut g = match data.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let session = &mut *g;
    if !session.state.manual.advance_pot(&session.pots) {
        return bad_request(format!(
            "{} still has teams to place or is the last pot",
            session.state.manual.current_pot
        ));
    }
    session.save();
    HttpResponse::Ok().json(&session.state.manual)
}

#[post("/api/manual/reset")]
async fn api_reset_manual(data: AppData) -> HttpResponse {
    let mut g = match data.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let session = &mut *g;
    session.state.manual.reset(&session.pots);
    session.save();
    HttpResponse::Ok().json(&session.state.manual)
}

/// Commit the automatic or manual draw: Draw -> GroupStage.
#[post("/api/tournament/groups")]
async fn api_commit_groups(data: AppData, body: Json<CommitGroupsBody>) -> HttpResponse {
    let mut g = match data.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.state.commit_groups(body.source) {
        Ok(()) => {
            g.save();
            HttpResponse::Ok().json(&g.state)
        }
        Err(e) => bad_request(e),
    }
}

#[post("/api/tournament/standings/move")]
async fn api_move_team(data: AppData, body: Json<MoveTeamBody>) -> HttpResponse {
    let mut g = match data.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let standings = match g.state.pending_standings.as_mut() {
        Some(s) => s,
        None => return bad_request("Standings can only be edited during the group stage"),
    };
    match body.direction {
        MoveDirection::Up => standings.move_up(body.group, body.index),
        MoveDirection::Down => standings.move_down(body.group, body.index),
    }
    g.save();
    HttpResponse::Ok().json(&g.state.pending_standings)
}

/// Commit standings: GroupStage -> RoundOf32.
#[post("/api/tournament/bracket")]
async fn api_begin_bracket(data: AppData, body: Option<Json<BeginBracketBody>>) -> HttpResponse {
    let mut g = match data.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let body = body.map(Json::into_inner).unwrap_or_default();
    let standings = match body.standings.or_else(|| g.state.pending_standings.clone()) {
        Some(s) => s,
        None => return bad_request("All groups must be ranked"),
    };
    match begin_bracket(&mut g.state.tournament, standings) {
        Ok(()) => {
            g.state.pending_standings = None;
            g.save();
            HttpResponse::Ok().json(&g.state.tournament)
        }
        Err(e) => bad_request(e),
    }
}

#[post("/api/tournament/winner")]
async fn api_record_winner(data: AppData, body: Json<RecordWinnerBody>) -> HttpResponse {
    let mut g = match data.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match record_winner(&mut g.state.tournament, body.round, body.match_id, &body.team) {
        Ok(()) => {
            g.save();
            HttpResponse::Ok().json(&g.state.tournament)
        }
        Err(e) => bad_request(e),
    }
}

#[post("/api/tournament/reset")]
async fn api_reset_tournament(data: AppData) -> HttpResponse {
    let mut g = match data.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.state.reset_bracket();
    g.save();
    HttpResponse::Ok().json(&g.state)
}

/// Forget everything: delete the state file and start over.
#[post("/api/reset")]
async fn api_reset_all(data: AppData) -> HttpResponse {
    let mut g = match data.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let session = &mut *g;
    if let Err(e) = session.store.clear() {
        log::error!("Failed to remove {}: {}", session.store.path().display(), e);
        return HttpResponse::InternalServerError().body(e.to_string());
    }
    session.state = AppState::new(&session.pots);
    log::info!("State reset");
    HttpResponse::Ok().json(&session.state)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let store = StateStore::new(&config.state_path);
    let state = store.load().unwrap_or_else(|e| {
        log::error!("Could not load {}: {}; starting fresh", config.state_path.display(), e);
        AppState::default()
    });
    log::info!(
        "Loaded state (tournament phase {:?}, draw step {:?})",
        state.tournament.phase,
        state.step
    );

    let session = Data::new(RwLock::new(Session {
        state,
        store,
        pots: Pots::official(),
    }));
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(session.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_get_state)
            .service(api_get_pots)
            .service(api_generate_draw)
            .service(api_reset_draw)
            .service(api_draw_stats)
            .service(api_export_draw)
            .service(api_get_manual)
            .service(api_validate_placement)
            .service(api_place_team)
            .service(api_next_pot)
            .service(api_reset_manual)
            .service(api_commit_groups)
            .service(api_move_team)
            .service(api_begin_bracket)
            .service(api_record_winner)
            .service(api_reset_tournament)
            .service(api_reset_all)
    })
    .bind(bind)?
    .run()
    .await
}
