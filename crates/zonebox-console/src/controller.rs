use zonebox_core::{parse_command, Command, SceneState};

use crate::client::InterpretClient;
use crate::shorthand::parse_height_shorthand;

enum Mode {
    Online(InterpretClient),
    Offline,
}

/// Owns the scene and turns each submitted line into at most one command.
///
/// Failures never reach the user: they are logged and the scene stays as it
/// was.
pub struct Controller {
    scene: SceneState,
    mode: Mode,
}

impl Controller {
    pub fn online(client: InterpretClient) -> Self {
        Self {
            scene: SceneState::default(),
            mode: Mode::Online(client),
        }
    }

    pub fn offline() -> Self {
        Self {
            scene: SceneState::default(),
            mode: Mode::Offline,
        }
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Submit the contents of `input`, which is always left empty afterwards.
    /// Returns whether the scene changed.
    pub async fn submit(&mut self, input: &mut String) -> bool {
        let text = std::mem::take(input);
        if text.trim().is_empty() {
            return false;
        }

        match self.resolve(&text).await {
            Some(command) => self.scene.apply(&command),
            None => false,
        }
    }

    async fn resolve(&self, text: &str) -> Option<Command> {
        let client = match &self.mode {
            Mode::Offline => {
                let command = parse_height_shorthand(text);
                if command.is_none() {
                    tracing::debug!(text, "no shorthand match");
                }
                return command;
            }
            Mode::Online(client) => client,
        };

        let payload = match client.submit(text).await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "interpret request failed");
                return None;
            }
        };

        let command = parse_command(&payload);
        if command.is_none() {
            tracing::warn!(%payload, "rejected interpreted command");
        }
        command
    }
}
