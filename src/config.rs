use serde::{Deserialize, Serialize};

/// Everything the host needs to know about the page and the game binary.
/// Missing keys fall back to `HostConfig::default()`, so a page can pass
/// `{ moduleUrl: "/rocket.wasm" }` and nothing else.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostConfig {
    pub canvas_id: String,
    pub module_url: String,
    pub background: String,
    pub text_color: String,
    pub prompt_text: String,
    pub prompt_font: String,
    pub prompt_position: (f64, f64),
    pub score_font: String,
    pub score_position: (f64, f64),
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            canvas_id: "canvas".into(),
            module_url: "/js/rocket.wasm".into(),
            background: "black".into(),
            text_color: "orange".into(),
            prompt_text: "Click on the canvas to play".into(),
            prompt_font: "32px sans-serif".into(),
            prompt_position: (60.0, 130.0),
            score_font: "20px sans-serif".into(),
            score_position: (10.0, 10.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_layout() {
        let config = HostConfig::default();
        assert_eq!(config.canvas_id, "canvas");
        assert_eq!(config.module_url, "/js/rocket.wasm");
        assert_eq!(config.prompt_position, (60.0, 130.0));
        assert_eq!(config.score_position, (10.0, 10.0));
    }
}
