//! MCP (Model Context Protocol) server.
//!
//! Exposes scoring and highlighting over stdio. Tools delegate to
//! `readgrade-core`, the same functions the CLI commands call, and answer
//! with pretty-printed JSON.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use readgrade_core::config::{Config, GradeOverrides};
use readgrade_core::{ColorMode, GradeConfig, HighlightBy, Verdict, highlight, markdown, score};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `score_text` tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct ScoreTextParams {
    /// The text to score.
    pub text: String,
    /// Target grade level. Falls back to max_grade, then 7.
    pub target_grade: Option<f64>,
    /// Maximum acceptable grade level.
    pub max_grade: Option<f64>,
    /// Color scale: "classic" or "clear".
    pub color_mode: Option<ColorMode>,
    /// Whether to strip markdown formatting before scoring.
    #[serde(default)]
    pub strip_markdown: bool,
}

/// Parameters for the `highlight_text` tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct HighlightTextParams {
    /// The text to highlight.
    pub text: String,
    /// Target grade level. Falls back to max_grade, then 7.
    pub target_grade: Option<f64>,
    /// Maximum acceptable grade level.
    pub max_grade: Option<f64>,
    /// Color scale: "classic" or "clear".
    pub color_mode: Option<ColorMode>,
    /// Unit to score: "sentence" or "paragraph".
    pub by: Option<HighlightBy>,
    /// Force highlighting on or off. Omit to highlight only above target.
    pub highlight: Option<bool>,
    /// Whether to strip markdown formatting before scoring.
    #[serde(default)]
    pub strip_markdown: bool,
}

/// MCP server exposing readgrade scoring.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    config: Config,
    max_input_bytes: Option<usize>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        let config = Config::default();
        let max_input_bytes = config.input_limit();
        Self::new(config, max_input_bytes)
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a server that resolves unset parameters from `config`.
    pub fn new(config: Config, max_input_bytes: Option<usize>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config,
            max_input_bytes,
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Score text for reading grade level.
    #[tool(
        description = "Score text for reading grade level. Returns the blended grade, a hue \
                       (120 easy, 60 on target, 0 too hard), the highlight color, and a verdict."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn score_text(
        &self,
        Parameters(params): Parameters<ScoreTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "score_text", strip_md = params.strip_markdown, "executing MCP tool");

        let grades = self.grades(params.target_grade, params.max_grade, params.color_mode)?;
        let text = self.prepare(&params.text, params.strip_markdown)?;
        let result = score(&text, &grades);
        let verdict = Verdict::classify(result.grade, &grades);

        let json = to_json(&serde_json::json!({
            "grade": result.grade,
            "hue": result.hue,
            "color": result.color().css(),
            "verdict": verdict,
            "message": verdict.status_message(),
            "grades": grades,
        }))?;

        tracing::info!(tool = "score_text", grade = result.grade, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Score each sentence or paragraph of a text.
    #[tool(
        description = "Split text into sentences or paragraphs and score each one. Returns the \
                       document score plus each unit's byte range, grade, hue, and whether it \
                       should be highlighted."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn highlight_text(
        &self,
        Parameters(params): Parameters<HighlightTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "highlight_text", by = ?params.by, "executing MCP tool");

        let grades = self.grades(params.target_grade, params.max_grade, params.color_mode)?;
        let text = self.prepare(&params.text, params.strip_markdown)?;
        let by = params.by.unwrap_or(self.config.highlight_by);
        let report = highlight(&text, &grades, by, params.highlight);

        let json = to_json(&report)?;

        tracing::info!(
            tool = "highlight_text",
            units = report.units.len(),
            grade = report.score.grade,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

impl ProjectServer {
    fn grades(
        &self,
        target_grade: Option<f64>,
        max_grade: Option<f64>,
        color_mode: Option<ColorMode>,
    ) -> Result<GradeConfig, McpError> {
        GradeOverrides {
            target_grade,
            max_grade,
            color_mode,
        }
        .resolve(&self.config)
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }

    fn prepare(&self, text: &str, strip_markdown: bool) -> Result<String, McpError> {
        if let Some(max) = self.max_input_bytes
            && text.len() > max
        {
            return Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            ));
        }
        Ok(if strip_markdown {
            markdown::strip_to_prose(text)
        } else {
            text.to_string()
        })
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use score_text for a grade level and highlight_text to find \
                 the hardest sentences or paragraphs.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
