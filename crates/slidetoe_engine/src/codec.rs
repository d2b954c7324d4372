//! Snapshot codec for the storage collaborator.
//!
//! Only cross-round progress is durable: the round counter, the mute
//! preference, and each seat's score and profile. Board contents and the
//! sliding queues are never written, so a reload always starts from an
//! empty board.

use super::player::PlayerProfile;
use super::{MatchState, PlayerId};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Snapshot decode failure with location tracking.
///
/// Always recovered locally: the caller starts a fresh match instead.
#[derive(Debug, Clone, Display, Error)]
#[display("Malformed snapshot: {} at {}:{}", message, file, line)]
pub struct MalformedSnapshot {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl MalformedSnapshot {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for MalformedSnapshot {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}

/// Persisted record of one seat.
///
/// Numeric fields are signed and optional so that missing or negative values
/// read from storage survive until validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    score: Option<i64>,
    color_token: String,
    display_name: String,
    avatar_token: String,
}

/// Persisted match progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    round_number: Option<i64>,
    muted: bool,
    players: [PlayerRecord; 2],
}

/// Validated snapshot contents, ready to seed a [`MatchState`].
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PartialMatchState {
    round_number: u32,
    muted: bool,
    scores: [u32; 2],
    profiles: [PlayerProfile; 2],
}

/// Captures the durable part of a match.
#[instrument(skip(state), fields(round = state.round_number()))]
pub fn serialize(state: &MatchState) -> Snapshot {
    let players = PlayerId::ALL.map(|id| {
        let player = state.player(id);
        let profile = player.profile();
        PlayerRecord::new(
            Some(i64::from(player.score())),
            profile.color_token().clone(),
            profile.display_name().clone(),
            profile.avatar_token().clone(),
        )
    });

    Snapshot::new(Some(i64::from(state.round_number())), state.is_muted(), players)
}

/// Validates a snapshot.
///
/// # Errors
///
/// Returns [`MalformedSnapshot`] if the round counter or a score is missing,
/// negative, or too large. An empty display name falls back to the seat
/// default instead of failing.
#[instrument(skip(snapshot))]
pub fn deserialize(snapshot: &Snapshot) -> Result<PartialMatchState, MalformedSnapshot> {
    let round_number = non_negative("roundNumber", *snapshot.round_number())?;

    let [p1, p2] = snapshot.players();
    let scores = [
        non_negative("players[0].score", *p1.score())?,
        non_negative("players[1].score", *p2.score())?,
    ];
    let profiles = [profile_from(PlayerId::P1, p1), profile_from(PlayerId::P2, p2)];

    debug!(round_number, ?scores, "Snapshot decoded");
    Ok(PartialMatchState {
        round_number,
        muted: *snapshot.muted(),
        scores,
        profiles,
    })
}

fn non_negative(field: &str, value: Option<i64>) -> Result<u32, MalformedSnapshot> {
    let value = value.ok_or_else(|| MalformedSnapshot::new(format!("missing {}", field)))?;
    u32::try_from(value)
        .map_err(|_| MalformedSnapshot::new(format!("{} out of range: {}", field, value)))
}

fn profile_from(id: PlayerId, record: &PlayerRecord) -> PlayerProfile {
    let defaults = PlayerProfile::default_for(id);
    let pick = |value: &String, default: &String| {
        if value.trim().is_empty() {
            default.clone()
        } else {
            value.clone()
        }
    };

    PlayerProfile::new(
        pick(record.display_name(), defaults.display_name()),
        pick(record.color_token(), defaults.color_token()),
        pick(record.avatar_token(), defaults.avatar_token()),
    )
}

// ─────────────────────────────────────────────────────────────
//  Wire form: three flat records keyed `game`, `p1`, `p2`
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameRecord {
    round_number: Option<i64>,
    #[serde(default)]
    muted: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct SeatRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    color: String,
    score: Option<i64>,
    #[serde(default, alias = "avaterSrc")]
    avatar: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredRecords {
    game: GameRecord,
    p1: SeatRecord,
    p2: SeatRecord,
}

impl From<&PlayerRecord> for SeatRecord {
    fn from(record: &PlayerRecord) -> Self {
        Self {
            name: record.display_name.clone(),
            color: record.color_token.clone(),
            score: record.score,
            avatar: record.avatar_token.clone(),
        }
    }
}

impl From<SeatRecord> for PlayerRecord {
    fn from(record: SeatRecord) -> Self {
        Self::new(record.score, record.color, record.name, record.avatar)
    }
}

impl Snapshot {
    /// Encodes the snapshot as the flat `game`/`p1`/`p2` record set.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedSnapshot`] if JSON encoding fails.
    #[instrument(skip(self))]
    pub fn to_json(&self) -> Result<String, MalformedSnapshot> {
        let [p1, p2] = &self.players;
        let records = StoredRecords {
            game: GameRecord {
                round_number: self.round_number,
                muted: self.muted,
            },
            p1: p1.into(),
            p2: p2.into(),
        };
        Ok(serde_json::to_string_pretty(&records)?)
    }

    /// Parses the flat record set written by [`Snapshot::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`MalformedSnapshot`] if a record is missing or a field has the
    /// wrong type. Range checks happen in [`deserialize`].
    #[instrument(skip(text), fields(len = text.len()))]
    pub fn from_json(text: &str) -> Result<Self, MalformedSnapshot> {
        let records: StoredRecords = serde_json::from_str(text)?;
        Ok(Self::new(
            records.game.round_number,
            records.game.muted,
            [records.p1.into(), records.p2.into()],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: Option<i64>) -> PlayerRecord {
        PlayerRecord::new(
            score,
            "#00FF00".to_string(),
            "Ada".to_string(),
            "/assets/avatars/4.svg".to_string(),
        )
    }

    #[test]
    fn test_fresh_state_serializes_defaults() {
        let snapshot = serialize(&MatchState::default());
        assert_eq!(*snapshot.round_number(), Some(0));
        assert!(!*snapshot.muted());
        assert_eq!(snapshot.players()[0].display_name(), "Player 1");
        assert_eq!(snapshot.players()[1].color_token(), "#396AEB");
    }

    #[test]
    fn test_negative_score_is_malformed() {
        let snapshot = Snapshot::new(Some(2), false, [record(Some(1)), record(Some(-1))]);
        let err = deserialize(&snapshot).unwrap_err();
        assert!(err.message.contains("players[1].score"));
    }

    #[test]
    fn test_negative_round_is_malformed() {
        let snapshot = Snapshot::new(Some(-3), false, [record(Some(0)), record(Some(0))]);
        assert!(deserialize(&snapshot).is_err());
    }

    #[test]
    fn test_missing_round_is_malformed() {
        let snapshot = Snapshot::new(None, true, [record(Some(0)), record(Some(0))]);
        let err = deserialize(&snapshot).unwrap_err();
        assert!(err.message.contains("missing roundNumber"));
    }

    #[test]
    fn test_oversized_score_is_malformed() {
        let snapshot = Snapshot::new(
            Some(0),
            false,
            [record(Some(i64::from(u32::MAX) + 1)), record(Some(0))],
        );
        assert!(deserialize(&snapshot).is_err());
    }

    #[test]
    fn test_empty_name_falls_back_to_default() {
        let blank = PlayerRecord::new(Some(0), String::new(), String::new(), String::new());
        let snapshot = Snapshot::new(Some(0), false, [record(Some(0)), blank]);
        let partial = deserialize(&snapshot).expect("valid snapshot");
        assert_eq!(partial.profiles()[1], PlayerProfile::default_for(PlayerId::P2));
        assert_eq!(partial.profiles()[0].display_name(), "Ada");
    }

    #[test]
    fn test_json_uses_flat_records() {
        let snapshot = Snapshot::new(Some(4), true, [record(Some(2)), record(Some(1))]);
        let json = snapshot.to_json().expect("encodes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value["game"]["roundNumber"], 4);
        assert_eq!(value["game"]["muted"], true);
        assert_eq!(value["p1"]["name"], "Ada");
        assert_eq!(value["p2"]["score"], 1);
        assert_eq!(Snapshot::from_json(&json).expect("decodes"), snapshot);
    }

    #[test]
    fn test_json_missing_record_is_malformed() {
        let text = r#"{"game": {"roundNumber": 1, "muted": false}, "p1": {"score": 0}}"#;
        assert!(Snapshot::from_json(text).is_err());
    }

    #[test]
    fn test_json_missing_score_reaches_validation() {
        let text = r##"{
            "game": {"roundNumber": 1},
            "p1": {"name": "A", "color": "#111111", "avatar": "a"},
            "p2": {"name": "B", "color": "#222222", "score": 1, "avatar": "b"}
        }"##;
        let snapshot = Snapshot::from_json(text).expect("structurally valid");
        assert_eq!(*snapshot.players()[0].score(), None);
        assert!(deserialize(&snapshot).is_err());
    }

    #[test]
    fn test_json_reads_legacy_avatar_key() {
        let text = r##"{
            "game": {"roundNumber": 0, "muted": false},
            "p1": {"name": "A", "color": "#111111", "score": 0, "avaterSrc": "/assets/avatars/6.svg"},
            "p2": {"name": "B", "color": "#222222", "score": 0, "avatar": "/assets/avatars/2.svg"}
        }"##;
        let snapshot = Snapshot::from_json(text).expect("structurally valid");
        assert_eq!(snapshot.players()[0].avatar_token(), "/assets/avatars/6.svg");
        assert_eq!(snapshot.players()[1].avatar_token(), "/assets/avatars/2.svg");
    }

    #[test]
    fn test_json_wrong_type_is_malformed() {
        let text = r#"{
            "game": {"roundNumber": "two"},
            "p1": {"score": 0},
            "p2": {"score": 0}
        }"#;
        assert!(Snapshot::from_json(text).is_err());
    }
}
