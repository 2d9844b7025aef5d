//! Line-oriented parser for the flowchart grammar the diagram prompt asks
//! the model to emit: a `flowchart` header, circular `id(("Label"))` nodes,
//! `-->` edges and class-based styling directives.

use super::RenderError;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static NODE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([A-Za-z0-9_-]+)\(\("?(.*?)"?\)\)$"#).expect("node pattern is valid")
});

static EDGE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^([A-Za-z0-9_-]+)(?:\(\("?(.*?)"?\)\))?\s*-->\s*(?:\|([^|]*)\|\s*)?([A-Za-z0-9_-]+)(?:\(\("?(.*?)"?\)\))?$"#,
    )
    .expect("edge pattern is valid")
});

/// Flow direction from the header statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TopDown,
    LeftRight,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub class_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub label: Option<String>,
}

/// Parsed diagram. Node indices are declaration order; `class_defs` holds
/// raw `classDef` attribute pairs keyed by class name.
#[derive(Debug)]
pub struct Graph {
    pub direction: Direction,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub class_defs: HashMap<String, Vec<(String, String)>>,
}

impl Graph {
    fn ensure_node(&mut self, id: &str, label: Option<&str>) -> usize {
        if let Some(index) = self.nodes.iter().position(|n| n.id == id) {
            if let Some(label) = label {
                self.nodes[index].label = label.to_string();
            }
            return index;
        }
        self.nodes.push(Node {
            id: id.to_string(),
            label: label.unwrap_or(id).to_string(),
            class_name: None,
        });
        self.nodes.len() - 1
    }
}

/// Parse a diagram script. The first significant line must be a `flowchart`
/// (or `graph`) header; any statement outside the grammar fails with the
/// offending line number.
pub fn parse(source: &str) -> Result<Graph, RenderError> {
    let mut graph: Option<Graph> = None;

    for (index, raw_line) in source.lines().enumerate() {
        let line = raw_line.trim();
        let line_no = index + 1;
        if line.is_empty() || line.starts_with("%%") {
            continue;
        }

        match graph.as_mut() {
            None => graph = Some(parse_header(line)?),
            Some(graph) => parse_statement(graph, line, line_no)?,
        }
    }

    graph.ok_or(RenderError::Empty)
}

fn parse_header(line: &str) -> Result<Graph, RenderError> {
    let mut words = line.split_whitespace();
    let keyword = words.next().unwrap_or_default();
    if keyword != "flowchart" && keyword != "graph" {
        return Err(RenderError::MissingHeader(line.to_string()));
    }

    let direction = match words.next() {
        Some("TD" | "TB") => Direction::TopDown,
        Some("LR") => Direction::LeftRight,
        other => {
            return Err(RenderError::Direction(
                other.unwrap_or_default().to_string(),
            ))
        }
    };

    Ok(Graph {
        direction,
        nodes: Vec::new(),
        edges: Vec::new(),
        class_defs: HashMap::new(),
    })
}

fn parse_statement(graph: &mut Graph, line: &str, line_no: usize) -> Result<(), RenderError> {
    if let Some(rest) = line.strip_prefix("classDef ") {
        return parse_class_def(graph, rest, line_no);
    }
    if let Some(rest) = line.strip_prefix("class ") {
        return parse_class_assignment(graph, rest, line_no);
    }

    if let Some(captures) = EDGE_DECL.captures(line) {
        let from = graph.ensure_node(&captures[1], captures.get(2).map(|m| m.as_str()));
        let to = graph.ensure_node(&captures[4], captures.get(5).map(|m| m.as_str()));
        let label = captures
            .get(3)
            .map(|m| m.as_str().trim().to_string())
            .filter(|l| !l.is_empty());
        graph.edges.push(Edge { from, to, label });
        return Ok(());
    }

    if let Some(captures) = NODE_DECL.captures(line) {
        graph.ensure_node(&captures[1], Some(&captures[2]));
        return Ok(());
    }

    Err(RenderError::Statement {
        line: line_no,
        text: line.to_string(),
    })
}

/// `classDef name key:value,key:value`
fn parse_class_def(graph: &mut Graph, rest: &str, line_no: usize) -> Result<(), RenderError> {
    let Some((name, attrs)) = rest.trim().split_once(char::is_whitespace) else {
        return Err(RenderError::Statement {
            line: line_no,
            text: format!("classDef {rest}"),
        });
    };

    let mut pairs = Vec::new();
    for attr in attrs.split(',') {
        let Some((key, value)) = attr.split_once(':') else {
            return Err(RenderError::Statement {
                line: line_no,
                text: format!("classDef {rest}"),
            });
        };
        pairs.push((key.trim().to_string(), value.trim().to_string()));
    }
    graph.class_defs.insert(name.trim().to_string(), pairs);
    Ok(())
}

/// `class id1,id2 className`
fn parse_class_assignment(graph: &mut Graph, rest: &str, line_no: usize) -> Result<(), RenderError> {
    let Some((ids, name)) = rest.trim().rsplit_once(char::is_whitespace) else {
        return Err(RenderError::Statement {
            line: line_no,
            text: format!("class {rest}"),
        });
    };

    let name = name.trim();
    for id in ids.split(',') {
        let id = id.trim();
        if id.is_empty() {
            continue;
        }
        let index = graph.ensure_node(id, None);
        graph.nodes[index].class_name = Some(name.to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_nodes_edges_and_classes() {
        let source = r#"flowchart TD
%% accountability chart
A(("CEO"))
B(("CFO"))
A --> B
A -->|delegates| C(("Auditor"))
classDef high-importance stroke-width:4px,stroke:#C62828,color:#000
class A high-importance
class B,C medium-importance"#;

        let graph = parse(source).unwrap();
        assert_eq!(graph.direction, Direction::TopDown);
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.nodes[0].label, "CEO");
        assert_eq!(graph.nodes[2].label, "Auditor");
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[1].label.as_deref(), Some("delegates"));
        assert_eq!(graph.nodes[0].class_name.as_deref(), Some("high-importance"));
        assert_eq!(graph.nodes[1].class_name.as_deref(), Some("medium-importance"));
        let high = &graph.class_defs["high-importance"];
        assert!(high.contains(&("stroke".to_string(), "#C62828".to_string())));
    }

    #[test]
    fn edge_endpoints_create_nodes_with_id_as_label() {
        let graph = parse("flowchart TD\nA --> B").unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[1].label, "B");
    }

    #[test]
    fn unquoted_labels_are_accepted() {
        let graph = parse("flowchart TD\nA((팀장))").unwrap();
        assert_eq!(graph.nodes[0].label, "팀장");
    }

    #[test]
    fn left_right_direction_is_supported() {
        let graph = parse("flowchart LR\nA --> B").unwrap();
        assert_eq!(graph.direction, Direction::LeftRight);
    }

    #[test]
    fn missing_header_fails() {
        assert!(matches!(
            parse("A --> B"),
            Err(RenderError::MissingHeader(_))
        ));
    }

    #[test]
    fn unknown_direction_fails() {
        assert!(matches!(
            parse("flowchart RL\nA --> B"),
            Err(RenderError::Direction(_))
        ));
    }

    #[test]
    fn unrecognized_statement_reports_its_line() {
        let error = parse("flowchart TD\nA --> B\nsubgraph nope").unwrap_err();
        match error {
            RenderError::Statement { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_script_fails() {
        assert!(matches!(parse("  \n%% nothing\n"), Err(RenderError::Empty)));
    }
}
