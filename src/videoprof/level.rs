use crate::error::{Result, VideoprofError};
use colored::{Color, Colorize};

/// Display style and severity shared by preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Level {
    color: Option<Color>,
    flagged: bool,
}

impl Level {
    pub fn new(color: Option<Color>, flagged: bool) -> Self {
        Self { color, flagged }
    }

    /// Builds a level from a config color name such as "red" or "bright green".
    /// An empty name means no color.
    pub fn from_color_name(name: &str, flagged: bool) -> Result<Self> {
        if name.trim().is_empty() {
            return Ok(Self::new(None, flagged));
        }
        let color: Color = name
            .parse()
            .map_err(|_| VideoprofError::Config(format!("Unknown color: {}", name)))?;
        Ok(Self::new(Some(color), flagged))
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub fn render(&self, input: &str) -> String {
        match self.color {
            Some(color) => input.color(color).to_string(),
            None => input.to_string(),
        }
    }
}
