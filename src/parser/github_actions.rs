//! GitHub Actions workflow file parser

use crate::parser::traits::{ParseError, Parser};
use crate::parser::types::UsesValue;
use tracing::warn;

/// Parser for workflow files (.github/workflows/*.yml) and composite
/// action definitions (action.yml)
pub struct GitHubActionsParser;

impl GitHubActionsParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GitHubActionsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for GitHubActionsParser {
    fn parse(&self, content: &str) -> Result<Vec<UsesValue>, ParseError> {
        let mut parser = tree_sitter::Parser::new();
        let language = tree_sitter_yaml::LANGUAGE;
        parser.set_language(&language.into()).map_err(|e| {
            warn!("Failed to set YAML language for tree-sitter: {}", e);
            ParseError::TreeSitter(e.to_string())
        })?;

        let tree = parser.parse(content, None).ok_or_else(|| {
            warn!("Failed to parse YAML content");
            ParseError::ParseFailed("Failed to parse YAML".to_string())
        })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(ParseError::InvalidSyntax(format!(
                "YAML syntax error near line {}",
                first_error_line(root) + 1
            )));
        }

        let mut results = Vec::new();
        self.find_steps(root, content, &mut results);

        Ok(results)
    }
}

impl GitHubActionsParser {
    /// Find all 'steps' blocks and extract 'uses' values from them
    ///
    /// Both `jobs.<job>.steps` in workflows and `runs.steps` in composite
    /// actions have this shape:
    /// ```text
    /// block_mapping_pair          <- "steps: ..."
    ///   flow_node                 <- key: "steps"
    ///   block_node
    ///     block_sequence          <- list of steps
    ///       block_sequence_item   <- "- uses: ..."
    ///         block_node
    ///           block_mapping
    ///             block_mapping_pair    <- TARGET: "uses: actions/checkout@v4"
    ///               flow_node           <- key: "uses"
    ///               flow_node           <- value: "actions/checkout@v4"
    /// ```
    ///
    /// Job-level `uses:` (reusable workflow calls) sits outside `steps` and is skipped.
    fn find_steps(&self, node: tree_sitter::Node, content: &str, results: &mut Vec<UsesValue>) {
        if node.kind() == "block_mapping_pair"
            && let Some(key_node) = node.child_by_field_name("key")
            && self.get_node_text(key_node, content) == "steps"
            && let Some(value_node) = node.child_by_field_name("value")
        {
            self.find_uses_in_steps(value_node, content, results);
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.find_steps(child, content, results);
        }
    }

    fn find_uses_in_steps(
        &self,
        node: tree_sitter::Node,
        content: &str,
        results: &mut Vec<UsesValue>,
    ) {
        if node.kind() == "block_mapping_pair"
            && let Some(key_node) = node.child_by_field_name("key")
            && self.get_node_text(key_node, content) == "uses"
            && let Some(value_node) = node.child_by_field_name("value")
        {
            results.push(UsesValue {
                value: self.get_node_text(value_node, content),
                line: value_node.start_position().row,
            });
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.find_uses_in_steps(child, content, results);
        }
    }

    /// Get text content of a node, removing quotes if present
    fn get_node_text(&self, node: tree_sitter::Node, content: &str) -> String {
        let text = &content[node.byte_range()];
        text.trim()
            .trim_start_matches('"')
            .trim_end_matches('"')
            .trim_start_matches('\'')
            .trim_end_matches('\'')
            .to_string()
    }
}

fn first_error_line(node: tree_sitter::Node) -> usize {
    if node.is_error() || node.is_missing() {
        return node.start_position().row;
    }
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .find(|child| child.has_error())
        .map(first_error_line)
        .unwrap_or(node.start_position().row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(content: &str) -> Vec<String> {
        GitHubActionsParser::new()
            .parse(content)
            .unwrap()
            .into_iter()
            .map(|u| u.value)
            .collect()
    }

    #[test]
    fn parse_extracts_action_with_line() {
        let content = r#"name: CI
on: push
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
"#;
        let result = GitHubActionsParser::new().parse(content).unwrap();
        assert_eq!(
            result,
            vec![UsesValue {
                value: "actions/checkout@v4".to_string(),
                line: 6,
            }]
        );
    }

    #[test]
    fn parse_extracts_multiple_actions_across_jobs_in_order() {
        let content = r#"jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - name: Setup
        uses: actions/setup-node@v4.3.0
  test:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/cache/save@v3
"#;
        assert_eq!(
            values(content),
            vec![
                "actions/checkout@v4",
                "actions/setup-node@v4.3.0",
                "actions/cache/save@v3"
            ]
        );
    }

    #[test]
    fn parse_extracts_composite_action_steps() {
        let content = r#"name: Setup
description: Composite setup
runs:
  using: composite
  steps:
    - uses: actions/setup-go@v5
    - run: go version
      shell: bash
"#;
        assert_eq!(values(content), vec!["actions/setup-go@v5"]);
    }

    #[test]
    fn parse_handles_quoted_uses() {
        let content = r#"jobs:
  build:
    steps:
      - uses: "actions/checkout@v4"
      - uses: 'actions/cache@v3'
"#;
        assert_eq!(values(content), vec!["actions/checkout@v4", "actions/cache@v3"]);
    }

    #[test]
    fn parse_excludes_trailing_comments() {
        let content = r#"jobs:
  test:
    steps:
      - uses: actions/checkout@cdca7365b2dadb8aad0a33bc7601856ffabcc48e # v4.2.2
      - uses: actions/setup-node@v4  # Node.js setup
"#;
        assert_eq!(
            values(content),
            vec![
                "actions/checkout@cdca7365b2dadb8aad0a33bc7601856ffabcc48e",
                "actions/setup-node@v4"
            ]
        );
    }

    #[test]
    fn parse_ignores_uses_outside_of_steps() {
        let content = r#"jobs:
  reusable:
    uses: org/repo/.github/workflows/reusable.yml@main
  test:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/setup-node@v4
"#;
        assert_eq!(values(content), vec!["actions/setup-node@v4"]);
    }

    #[test]
    fn parse_keeps_non_action_uses_values() {
        let content = r#"jobs:
  test:
    steps:
      - uses: ./.github/actions/local
      - uses: docker://alpine:3.8
"#;
        assert_eq!(
            values(content),
            vec!["./.github/actions/local", "docker://alpine:3.8"]
        );
    }

    #[test]
    fn parse_returns_empty_for_no_steps() {
        let content = r#"name: CI
on: push
"#;
        assert!(values(content).is_empty());
    }

    #[test]
    fn parse_rejects_invalid_yaml() {
        let content = "jobs:\n  build:\n    steps:\n      - uses: [unclosed\n";
        let result = GitHubActionsParser::new().parse(content);
        assert!(matches!(result, Err(ParseError::InvalidSyntax(_))));
    }
}
