//! Game room channel events, tagged by event name

use super::judge::Verdict;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRef {
    pub room_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodePayload {
    pub room_id: String,
    pub code: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_input: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    JoinGameRoom(RoomRef),
    GameRunCode(CodePayload),
    GameCodeSubmission(CodePayload),
    LeaveGameRoom(RoomRef),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub solved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: String,
    #[serde(default)]
    pub players: Vec<Player>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStart {
    pub problem_id: String,
    /// Seconds
    pub duration: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEnd {
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameError {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSolved {
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconnected {
    pub room: Room,
    /// Seconds left on the room clock
    pub remaining_time: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    RoomUpdate(Room),
    GameStart(GameStart),
    GameEnd(GameEnd),
    GameError(GameError),
    CodeResult(Verdict),
    PlayerSolvedProblem(PlayerSolved),
    ReconnectedToGame(Reconnected),
}

impl ServerEvent {
    /// Text for the status line, if the event warrants one
    pub fn notice(&self) -> Option<String> {
        match self {
            ServerEvent::GameStart(start) => {
                Some(format!("Game started: {} seconds on the clock", start.duration))
            }
            ServerEvent::GameEnd(end) => Some(match &end.winner {
                Some(winner) => format!("Game over, {} wins", winner),
                None => "Game over".to_string(),
            }),
            ServerEvent::GameError(error) => Some(error.message.clone()),
            ServerEvent::CodeResult(verdict) => Some(verdict.summary()),
            ServerEvent::PlayerSolvedProblem(solved) => {
                Some(format!("{} solved the problem", solved.username))
            }
            ServerEvent::RoomUpdate(_) | ServerEvent::ReconnectedToGame(_) => None,
        }
    }

    /// Server-side error or a rejected submission
    pub fn is_failure(&self) -> bool {
        match self {
            ServerEvent::GameError(_) => true,
            ServerEvent::CodeResult(verdict) => !verdict.is_accepted(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::decode;

    #[test]
    fn test_client_event_tagging() {
        let event = ClientEvent::JoinGameRoom(RoomRef {
            room_id: "r1".into(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "joinGameRoom");
        assert_eq!(json["data"]["roomId"], "r1");
    }

    #[test]
    fn test_decode_server_events() {
        let event: ServerEvent = decode(
            r#"{"event": "playerSolvedProblem", "data": {"userId": "u2", "username": "ada"}}"#,
        )
        .unwrap();
        assert_eq!(event.notice().as_deref(), Some("ada solved the problem"));

        let event: ServerEvent = decode(
            r#"{"event": "roomUpdate", "data": {"roomId": "r1", "status": "waiting",
                "players": [{"userId": "u1", "username": "bob"}]}}"#,
        )
        .unwrap();
        let ServerEvent::RoomUpdate(room) = event else {
            panic!("Expected room update");
        };
        assert_eq!(room.players.len(), 1);
        assert!(!room.players[0].solved);
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        assert!(decode::<ServerEvent>(r#"{"event": "chat", "data": {}}"#).is_err());
    }
}
