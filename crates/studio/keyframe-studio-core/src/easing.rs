//! Named easing curves offered by the editor.
//!
//! Easing values are CSS timing functions passed through to the export
//! verbatim; nothing here evaluates them.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EasingPreset {
    pub id: &'static str,
    pub name: &'static str,
    /// CSS timing function.
    pub value: &'static str,
}

pub static EASING_PRESETS: [EasingPreset; 8] = [
    EasingPreset { id: "linear", name: "Linear", value: "linear" },
    EasingPreset { id: "ease", name: "Ease", value: "ease" },
    EasingPreset { id: "ease-in", name: "Ease In", value: "ease-in" },
    EasingPreset { id: "ease-out", name: "Ease Out", value: "ease-out" },
    EasingPreset { id: "ease-in-out", name: "Ease In Out", value: "ease-in-out" },
    EasingPreset {
        id: "cubic-bezier-1",
        name: "Bounce",
        value: "cubic-bezier(0.68, -0.55, 0.265, 1.55)",
    },
    EasingPreset {
        id: "cubic-bezier-2",
        name: "Elastic",
        value: "cubic-bezier(0.175, 0.885, 0.32, 1.275)",
    },
    EasingPreset {
        id: "cubic-bezier-3",
        name: "Back",
        value: "cubic-bezier(0.68, -0.6, 0.32, 1.6)",
    },
];

pub fn preset(id: &str) -> Option<&'static EasingPreset> {
    EASING_PRESETS.iter().find(|p| p.id == id)
}
