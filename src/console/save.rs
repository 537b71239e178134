//! セーブ画面: 終了時にセーブ名を尋ねる

use std::io;

use color_eyre::Result;
use tracing::{info, warn};

use super::{ScreenMode, Session, Screen, Terminal};
use crate::storage::{SaveRecord, StoreError};

/// セーブ画面状態
#[derive(Debug, Default)]
pub struct SaveScreen;

impl SaveScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Screen for SaveScreen {
    fn render(&self, _session: &Session, _term: &mut dyn Terminal) -> io::Result<()> {
        Ok(())
    }

    fn prompt(&self, _session: &Session) -> String {
        "Enter a name to save your progress (leave blank to skip): ".to_string()
    }

    fn handle_line(&mut self, session: &mut Session, line: &str, term: &mut dyn Terminal) -> Result<Option<ScreenMode>> {
        let id = line.trim();
        if id.is_empty() {
            term.say("Progress not saved.")?;
            return Ok(Some(ScreenMode::Exit));
        }

        let record = SaveRecord::from(session.game.progress());
        match session.store.save(id, &record) {
            Ok(()) => {
                info!(target: "app", slot = id, "progress saved");
                term.say(&format!("Progress saved as '{id}'."))?;
                Ok(Some(ScreenMode::Exit))
            }
            Err(e @ StoreError::InvalidIdentifier(_)) => {
                // 名前が不正なだけなので再入力
                term.say(&e.to_string())?;
                Ok(None)
            }
            Err(e) => {
                warn!(target: "app", slot = id, error = %e, "save failed");
                term.say(&format!("Could not save your progress: {e}"))?;
                Ok(Some(ScreenMode::Exit))
            }
        }
    }
}
