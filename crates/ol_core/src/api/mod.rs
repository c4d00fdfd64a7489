pub mod json_api;

pub use json_api::{
    generate_pairings_json, score_fantasy_json, settle_event_json, FantasyRequest,
    FantasyResponse, PairingsRequest, PairingsResponse, SettleRequest, SettleResponse,
};
