//! Fixed visual theme for rendered charts, configured once per renderer.

use std::collections::HashMap;

/// Resolved visual attributes for one node class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStyle {
    pub stroke: String,
    pub stroke_width: f32,
    pub fill: String,
    pub color: String,
}

impl ClassStyle {
    fn new(stroke: &str, stroke_width: f32, fill: &str, color: &str) -> Self {
        Self {
            stroke: stroke.to_string(),
            stroke_width,
            fill: fill.to_string(),
            color: color.to_string(),
        }
    }
}

/// Colors and per-class styles applied to every rendered chart.
///
/// The default theme carries the three importance tiers the diagram prompt
/// asks the model to use, plus the base palette (white fill, black text,
/// `#444` edges).
#[derive(Debug, Clone)]
pub struct Theme {
    pub line_color: String,
    pub base: ClassStyle,
    classes: HashMap<String, ClassStyle>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut classes = HashMap::new();
        classes.insert(
            "high-importance".to_string(),
            ClassStyle::new("#C62828", 4.0, "#ffffff", "#000"),
        );
        classes.insert(
            "medium-importance".to_string(),
            ClassStyle::new("#FFA000", 2.0, "#ffffff", "#000"),
        );
        classes.insert(
            "low-importance".to_string(),
            ClassStyle::new("#AAAAAA", 1.0, "#f9f9f9", "#000"),
        );

        Self {
            line_color: "#444".to_string(),
            base: ClassStyle::new("#333333", 1.5, "#ffffff", "#000000"),
            classes,
        }
    }
}

impl Theme {
    /// Style for a class name; unknown names fall back to the base style.
    #[must_use]
    pub fn class_style(&self, name: &str) -> &ClassStyle {
        self.classes.get(name).unwrap_or(&self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_has_the_three_importance_tiers() {
        let theme = Theme::default();
        assert_eq!(theme.class_style("high-importance").stroke, "#C62828");
        assert_eq!(theme.class_style("medium-importance").stroke_width, 2.0);
        assert_eq!(theme.class_style("low-importance").fill, "#f9f9f9");
    }

    #[test]
    fn unknown_class_falls_back_to_base() {
        let theme = Theme::default();
        assert_eq!(theme.class_style("no-such-class"), &theme.base);
    }
}
