//! Standalone SVG emission for laid-out graphs.

use super::layout::Layout;
use super::parser::Graph;
use super::theme::{ClassStyle, Theme};
use std::fmt::Write as _;

const FONT_FAMILY: &str = "sans-serif";
const FONT_SIZE: f32 = 13.0;
const ARROW_LENGTH: f32 = 8.0;

pub fn render_svg(graph: &Graph, layout: &Layout, theme: &Theme) -> String {
    let mut out = String::new();
    let width = layout.width.ceil();
    let height = layout.height.ceil();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="{FONT_FAMILY}">"#
    );
    let _ = writeln!(out, "<defs>");
    let _ = writeln!(
        out,
        r#"  <marker id="arrow" markerWidth="10" markerHeight="7" refX="9" refY="3.5" orient="auto"><polygon points="0 0, 10 3.5, 0 7" fill="{}"/></marker>"#,
        theme.line_color
    );
    let _ = writeln!(out, "</defs>");

    let _ = writeln!(
        out,
        r#"<g stroke="{}" stroke-width="1.5" fill="none" marker-end="url(#arrow)">"#,
        theme.line_color
    );
    for edge in &graph.edges {
        let (x1, y1) = layout.positions[edge.from];
        let (x2, y2) = layout.positions[edge.to];
        let dx = x2 - x1;
        let dy = y2 - y1;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance <= f32::EPSILON {
            continue;
        }
        // Start and end on the circle boundaries, leaving room for the head.
        let start_t = layout.radii[edge.from] / distance;
        let end_t = 1.0 - (layout.radii[edge.to] + ARROW_LENGTH) / distance;
        let (sx, sy) = (x1 + dx * start_t, y1 + dy * start_t);
        let (ex, ey) = (x1 + dx * end_t, y1 + dy * end_t);
        let _ = writeln!(
            out,
            r#"  <line x1="{sx:.1}" y1="{sy:.1}" x2="{ex:.1}" y2="{ey:.1}" />"#
        );
    }
    let _ = writeln!(out, "</g>");

    for edge in &graph.edges {
        let Some(label) = &edge.label else { continue };
        let (x1, y1) = layout.positions[edge.from];
        let (x2, y2) = layout.positions[edge.to];
        let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
        let _ = writeln!(
            out,
            r#"<text x="{mx:.1}" y="{my:.1}" font-size="{size}" fill="{color}" text-anchor="middle" dominant-baseline="central">{text}</text>"#,
            size = FONT_SIZE - 2.0,
            color = theme.line_color,
            text = escape_xml(label)
        );
    }

    for (index, node) in graph.nodes.iter().enumerate() {
        let (cx, cy) = layout.positions[index];
        let radius = layout.radii[index];
        let style = resolve_style(graph, theme, node.class_name.as_deref());
        let _ = writeln!(
            out,
            r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{radius:.1}" fill="{fill}" stroke="{stroke}" stroke-width="{width}" />"#,
            fill = style.fill,
            stroke = style.stroke,
            width = style.stroke_width,
        );
        let _ = writeln!(
            out,
            r#"<text x="{cx:.1}" y="{cy:.1}" font-size="{FONT_SIZE}" fill="{color}" text-anchor="middle" dominant-baseline="central">{text}</text>"#,
            color = style.color,
            text = escape_xml(&node.label)
        );
    }

    out.push_str("</svg>\n");
    out
}

/// Theme style for the node's class, with `classDef` attributes from the
/// script layered on top.
fn resolve_style(graph: &Graph, theme: &Theme, class_name: Option<&str>) -> ClassStyle {
    let mut style = match class_name {
        Some(name) => theme.class_style(name).clone(),
        None => theme.base.clone(),
    };

    let Some(name) = class_name else { return style };
    let Some(pairs) = graph.class_defs.get(name) else {
        return style;
    };
    for (key, value) in pairs {
        match key.as_str() {
            "stroke" => style.stroke = value.clone(),
            "fill" => style.fill = value.clone(),
            "color" => style.color = value.clone(),
            "stroke-width" => {
                if let Ok(width) = value.trim_end_matches("px").parse::<f32>() {
                    style.stroke_width = width;
                }
            }
            // Unknown attributes are ignored, as the upstream renderer does.
            _ => {}
        }
    }
    style
}

fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{layout::layout, parser::parse};

    fn render(source: &str) -> String {
        let graph = parse(source).unwrap();
        let placed = layout(&graph);
        render_svg(&graph, &placed, &Theme::default())
    }

    #[test]
    fn emits_a_standalone_svg_with_circles_and_labels() {
        let svg = render("flowchart TD\nA((\"CEO\"))\nA --> B((\"CFO\"))");
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.ends_with("</svg>\n"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains(">CEO</text>"));
        assert!(svg.contains("marker-end=\"url(#arrow)\""));
    }

    #[test]
    fn class_assignment_picks_up_the_importance_stroke() {
        let svg = render("flowchart TD\nA((\"팀장\"))\nclass A high-importance");
        assert!(svg.contains("stroke=\"#C62828\""));
        assert!(svg.contains("stroke-width=\"4\""));
    }

    #[test]
    fn class_def_overrides_the_theme_entry() {
        let svg = render(
            "flowchart TD\nA((\"X\"))\nclassDef high-importance stroke:#123456,stroke-width:6px\nclass A high-importance",
        );
        assert!(svg.contains("stroke=\"#123456\""));
        assert!(svg.contains("stroke-width=\"6\""));
    }

    #[test]
    fn labels_are_xml_escaped() {
        let svg = render("flowchart TD\nA((\"R&D <Lead>\"))");
        assert!(svg.contains("R&amp;D &lt;Lead&gt;"));
    }

    #[test]
    fn edge_labels_appear_between_the_nodes() {
        let svg = render("flowchart TD\nA -->|approves| B");
        assert!(svg.contains(">approves</text>"));
    }
}
