//! Text shown by the host's score label.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ScoreDisplay {
    text: String,
}

impl Default for ScoreDisplay {
    fn default() -> Self {
        Self {
            text: format_score(0),
        }
    }
}

impl ScoreDisplay {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_total(&mut self, total: u32) {
        self.text = format_score(total);
    }
}

pub fn format_score(total: u32) -> String {
    format!("Score: {}", total)
}
