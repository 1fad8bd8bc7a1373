use crate::model::Theme;
use crate::render::{JsonRenderer, Renderer, TextRenderer, View};

/// The renderer a CLI invocation draws into, chosen by `--json`
#[derive(Debug, Clone)]
pub enum Output {
    Text(TextRenderer),
    Json(JsonRenderer),
}

impl Output {
    pub fn new(json: bool) -> Self {
        if json {
            Output::Json(JsonRenderer::new())
        } else {
            Output::Text(TextRenderer::new())
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Output::Json(_))
    }

    /// Theme the renderer was last told to apply
    pub fn theme(&self) -> Theme {
        match self {
            Output::Text(r) => r.theme(),
            Output::Json(r) => r.theme(),
        }
    }

    /// The latest frame, ready to print
    pub fn frame(&self) -> Result<String, serde_json::Error> {
        match self {
            Output::Text(r) => Ok(r.output()),
            Output::Json(r) => serde_json::to_string_pretty(&r.document()),
        }
    }
}

impl Renderer for Output {
    fn render(&mut self, view: &View<'_>) {
        match self {
            Output::Text(r) => r.render(view),
            Output::Json(r) => r.render(view),
        }
    }

    fn apply_theme(&mut self, theme: Theme) {
        match self {
            Output::Text(r) => r.apply_theme(theme),
            Output::Json(r) => r.apply_theme(theme),
        }
    }
}
