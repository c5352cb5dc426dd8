use std::sync::{Arc, Mutex, PoisonError};

use rocket::http::ContentType;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::{get, post, State};
use tracing::{debug, info};

use crate::dispatcher::SignalDispatcher;
use crate::tally::VoteTally;

pub struct AppState {
    pub tally: Mutex<VoteTally>,
    pub threshold: usize,
    pub dispatcher: Arc<SignalDispatcher>,
    pub index_page: Vec<u8>,
}

/// The host the request declares it was sent from. This keys a vote: it is
/// trivially spoofable and not a security boundary, just enough to stop
/// double counting from one client on a LAN.
pub struct VoterKey(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for VoterKey {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let key = req
            .headers()
            .get_one("Host")
            .map(str::to_string)
            .or_else(|| req.client_ip().map(|ip| ip.to_string()))
            .unwrap_or_else(|| "unknown".to_string());
        Outcome::Success(VoterKey(key))
    }
}

fn progress_message(count: usize, threshold: usize) -> String {
    format!("{count} users are voting to toggle recording state, {threshold} required")
}

fn cast_vote(state: &AppState, voter: VoterKey) -> String {
    // Register, count, and (past the threshold) reset under one lock
    // acquisition so concurrent votes cannot trigger twice.
    let progress = {
        let mut tally = state
            .tally
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        tally.register_vote(&voter.0);
        let count = tally.count();
        if count < state.threshold {
            Some(count)
        } else {
            tally.reset();
            None
        }
    };

    match progress {
        Some(count) => {
            debug!(voter = %voter.0, count, "vote registered");
            progress_message(count, state.threshold)
        }
        None => {
            info!(voter = %voter.0, "vote threshold reached, toggling recording state");
            state.dispatcher.toggle();
            "Triggering recording state change...".to_string()
        }
    }
}

#[get("/toggle")]
pub async fn vote(state: &State<AppState>, voter: VoterKey) -> String {
    cast_vote(state, voter)
}

#[post("/toggle")]
pub async fn vote_post(state: &State<AppState>, voter: VoterKey) -> String {
    cast_vote(state, voter)
}

#[get("/status")]
pub async fn status(state: &State<AppState>) -> String {
    let count = state
        .tally
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .count();
    progress_message(count, state.threshold)
}

#[get("/")]
pub async fn index(state: &State<AppState>) -> (ContentType, Vec<u8>) {
    (ContentType::HTML, state.index_page.clone())
}

/// Any GET path not matched above falls through to the index page, so the
/// page can be reached however a client bookmarks it.
#[get("/<_..>")]
pub async fn index_fallback(state: &State<AppState>) -> (ContentType, Vec<u8>) {
    (ContentType::HTML, state.index_page.clone())
}
