//! Narration language and localized speech templates
//!
//! The language is a plain value handed to whatever produces narration.
//! Nothing in the crate keeps a global language setting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlotError;

/// Supported narration languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl Language {
    /// Synthesizer voice used for every spoken text, live or rendered
    pub fn voice(&self) -> &'static str {
        match self {
            Language::En => "en-us",
            Language::Ja => "ja",
        }
    }

    /// Short code (`en` / `ja`)
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ja => "ja",
        }
    }

    pub fn enter(&self, title: &str) -> String {
        match self {
            Language::En => format!("Enter {}", title),
            Language::Ja => format!("{}に入りました", title),
        }
    }

    pub fn leave(&self, title: &str) -> String {
        match self {
            Language::En => format!("Leave {}", title),
            Language::Ja => format!("{}から出ました", title),
        }
    }

    pub fn label_selected(&self, label: usize) -> String {
        match self {
            Language::En => format!("label {} is selected", label),
            Language::Ja => format!("ラベル{}が選択されました", label),
        }
    }

    /// Hint appended to the enter announcement when several groups exist
    pub fn change_hint(&self) -> &'static str {
        match self {
            Language::En => "Double click to change.",
            Language::Ja => "ダブルクリックで変更できます。",
        }
    }

    /// Enter announcement naming the selected group, for multi-group plots
    pub fn enter_with_target(&self, title: &str, label: usize) -> String {
        match self {
            Language::En => format!(
                "{}. {}. {}",
                self.enter(title),
                self.label_selected(label),
                self.change_hint()
            ),
            Language::Ja => format!(
                "{}。{}。{}",
                self.enter(title),
                self.label_selected(label),
                self.change_hint()
            ),
        }
    }

    /// Spoken readout of a single point
    pub fn point(&self, x: f64, y: f64) -> String {
        match self {
            Language::En => format!("X is {}. Y is {}", x, y),
            Language::Ja => format!("Xは{}、Yは{}です", x, y),
        }
    }

    pub fn minimum(&self, value: &str) -> String {
        match self {
            Language::En => format!("minimum value is {}", value),
            Language::Ja => format!("最小値は{}です", value),
        }
    }

    pub fn maximum(&self, value: &str) -> String {
        match self {
            Language::En => format!("maximum value is {}", value),
            Language::Ja => format!("最大値は{}です", value),
        }
    }

    /// Announcement of the timbre assigned to an overlaid line
    pub fn line_shape(&self, label: &str, shape: &str) -> String {
        match self {
            Language::En => format!("{} is {} sound", label, shape),
            Language::Ja => format!("{}は{}の音です", label, shape),
        }
    }

    /// Default name of the n-th line (0-based index)
    pub fn default_line_label(&self, index: usize) -> String {
        match self {
            Language::En => format!("line {}", index + 1),
            Language::Ja => format!("ライン{}", index + 1),
        }
    }
}

impl FromStr for Language {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "ja" => Ok(Language::Ja),
            other => Err(PlotError::UnknownLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!("ja".parse::<Language>().unwrap(), Language::Ja);
        assert_eq!(
            "fr".parse::<Language>(),
            Err(PlotError::UnknownLanguage("fr".to_string()))
        );
        assert!("EN".parse::<Language>().is_err());
    }

    #[test]
    fn test_japanese_templates() {
        let lang: Language = "ja".parse().unwrap();
        assert_eq!(lang.voice(), "ja");
        assert_eq!(lang.enter("graph"), "graphに入りました");
        assert_eq!(lang.point(1.0, 2.5), "Xは1、Yは2.5です");
        assert_eq!(
            lang.enter_with_target("graph", 0),
            "graphに入りました。ラベル0が選択されました。ダブルクリックで変更できます。"
        );
    }

    #[test]
    fn test_english_templates() {
        let lang = Language::default();
        assert_eq!(lang.voice(), "en-us");
        assert_eq!(lang.point(0.0, 4.0), "X is 0. Y is 4");
        assert_eq!(lang.label_selected(1), "label 1 is selected");
        assert_eq!(
            lang.enter_with_target("graph", 1),
            "Enter graph. label 1 is selected. Double click to change."
        );
        assert_eq!(lang.line_shape("A", "Sine"), "A is Sine sound");
        assert_eq!(lang.default_line_label(0), "line 1");
    }
}
