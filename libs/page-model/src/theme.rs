//! Colour palette and font stack shared by every page.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Colour groups keyed by name, each mapping a shade to a hex value.
    pub colors: BTreeMap<String, BTreeMap<String, String>>,
    pub font_sans: Vec<String>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut colors = BTreeMap::new();
        colors.insert(
            "dark".to_string(),
            shades(&[
                ("900", "#0f172a"),
                ("800", "#1e293b"),
                ("700", "#334155"),
                ("600", "#475569"),
            ]),
        );
        colors.insert(
            "primary".to_string(),
            shades(&[("500", "#0ea5e9"), ("600", "#0284c7")]),
        );
        colors.insert(
            "accent".to_string(),
            shades(&[("teal", "#14b8a6"), ("amber", "#f59e0b"), ("rose", "#f43f5e")]),
        );

        Self {
            colors,
            font_sans: vec!["Poppins".to_string(), "sans-serif".to_string()],
        }
    }
}

fn shades(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(shade, hex)| (shade.to_string(), hex.to_string()))
        .collect()
}

impl Theme {
    pub fn color(&self, group: &str, shade: &str) -> Option<&str> {
        self.colors
            .get(group)
            .and_then(|g| g.get(shade))
            .map(String::as_str)
    }

    /// Renders the palette as a `:root` block of CSS custom properties.
    pub fn to_css_variables(&self) -> String {
        let mut css = String::from(":root {\n");
        for (group, shades) in &self.colors {
            for (shade, hex) in shades {
                let _ = writeln!(css, "  --{}-{}: {};", group, shade, hex);
            }
        }
        let fonts: Vec<String> = self
            .font_sans
            .iter()
            .map(|f| {
                if f.contains('-') {
                    f.clone()
                } else {
                    format!("\"{}\"", f)
                }
            })
            .collect();
        let _ = writeln!(css, "  --font-sans: {};", fonts.join(", "));
        css.push('}');
        css
    }
}
