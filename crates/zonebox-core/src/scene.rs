use std::fmt;

use crate::command::{Axis, Command};

pub const DEFAULT_HEIGHT: f64 = 1.0;
pub const DEFAULT_COLOR: &str = "#050505";
/// The envelope is always drawn translucent so the site stays visible.
pub const MATERIAL_OPACITY: f64 = 0.6;

/// Render state of the zoning envelope: a 1 × height × 1 box.
///
/// Each field has a single writer, [`SceneState::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub height: f64,
    pub color: String,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl SceneState {
    /// Apply a validated command. Returns whether anything changed.
    pub fn apply(&mut self, command: &Command) -> bool {
        match command {
            Command::Resize {
                axis: Axis::Y,
                value,
            } => {
                let changed = self.height != *value;
                self.height = *value;
                changed
            }
            Command::Resize { axis, .. } => {
                // Footprint is fixed at 1 × 1; only height is wired up.
                tracing::debug!(?axis, "resize on horizontal axis ignored");
                false
            }
            Command::Color { value } => {
                let changed = self.color != *value;
                self.color.clone_from(value);
                changed
            }
        }
    }

    /// Box dimensions as (width, height, depth) in meters.
    pub fn dimensions(&self) -> [f64; 3] {
        [1.0, self.height, 1.0]
    }
}

impl fmt::Display for SceneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w, h, d] = self.dimensions();
        write!(
            f,
            "box {w} × {h} × {d}, color {}, opacity {MATERIAL_OPACITY}",
            self.color
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_y_sets_height() {
        let mut scene = SceneState::default();
        assert!(scene.apply(&Command::Resize {
            axis: Axis::Y,
            value: 5.0
        }));
        assert_eq!(scene.height, 5.0);
        assert!(!scene.apply(&Command::Resize {
            axis: Axis::Y,
            value: 5.0
        }));
    }

    #[test]
    fn resize_x_and_z_leave_scene_untouched() {
        let mut scene = SceneState::default();
        for axis in [Axis::X, Axis::Z] {
            assert!(!scene.apply(&Command::Resize { axis, value: 9.0 }));
        }
        assert_eq!(scene, SceneState::default());
    }

    #[test]
    fn color_sets_color() {
        let mut scene = SceneState::default();
        assert!(scene.apply(&Command::Color {
            value: "red".to_string()
        }));
        assert_eq!(scene.color, "red");
        assert_eq!(scene.height, DEFAULT_HEIGHT);
    }

    #[test]
    fn display_describes_box() {
        let scene = SceneState {
            height: 5.0,
            color: "red".to_string(),
        };
        assert_eq!(scene.to_string(), "box 1 × 5 × 1, color red, opacity 0.6");
    }
}
