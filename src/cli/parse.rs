use pairjudge_core::format::OutputFormat;
use pairjudge_core::score::ScorePolicy;

/// Parse output format from string
pub fn parse_output_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse score policy from string
pub fn parse_score_policy(s: &str) -> std::result::Result<ScorePolicy, String> {
    s.parse::<ScorePolicy>().map_err(|e| e.to_string())
}
