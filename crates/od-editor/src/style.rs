//! Current style for new shapes, and the color-picker seam.

use crate::config::EditorConfig;
use od_core::parser::{is_color_token, is_number};
use od_core::token::ColorToken;

/// Style applied to shapes created from now on. Existing shapes keep
/// whatever they were created with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleState {
    pub outline: ColorToken,
    pub fill: ColorToken,
    pub outline_thickness: f64,
}

impl StyleState {
    /// Style from `config`. A configured value the text grammar cannot
    /// read back is replaced by the built-in default.
    pub fn from_config(config: &EditorConfig) -> Self {
        let builtin = Self::default();
        let color = |configured: &str, fallback: ColorToken| {
            if is_color_token(configured) {
                ColorToken::intern(configured)
            } else {
                log::warn!("default color {configured:?} is not a color token, using {fallback}");
                fallback
            }
        };
        Self {
            outline: color(&config.default_outline, builtin.outline),
            fill: color(&config.default_fill, builtin.fill),
            outline_thickness: if is_number(config.default_outline_thickness) {
                config.default_outline_thickness
            } else {
                builtin.outline_thickness
            },
        }
    }
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            outline: ColorToken::intern("black"),
            fill: ColorToken::intern("white"),
            outline_thickness: 1.0,
        }
    }
}

/// A host color chooser dialog.
pub trait ColorPicker {
    /// Ask the user for a color, starting from `initial`.
    /// Returns `None` when the dialog is cancelled.
    fn pick_color(&mut self, initial: ColorToken) -> Option<ColorToken>;
}

/// Replays a fixed sequence of answers. Useful for scripted hosts and tests.
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    answers: std::collections::VecDeque<Option<String>>,
    pub asked_with: Vec<ColorToken>,
}

impl ScriptedPicker {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
            asked_with: Vec::new(),
        }
    }
}

impl ColorPicker for ScriptedPicker {
    fn pick_color(&mut self, initial: ColorToken) -> Option<ColorToken> {
        self.asked_with.push(initial);
        self.answers
            .pop_front()
            .flatten()
            .map(|answer| ColorToken::intern(&answer))
    }
}
