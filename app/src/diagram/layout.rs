//! Layered placement for parsed graphs: longest-path layering along the
//! edge relation, declaration order within a layer.

use super::parser::{Direction, Graph};

const MARGIN: f32 = 40.0;
const NODE_GAP: f32 = 40.0;
const LAYER_GAP: f32 = 60.0;

/// Center positions and radii per node, plus the overall canvas size.
#[derive(Debug)]
pub struct Layout {
    pub positions: Vec<(f32, f32)>,
    pub radii: Vec<f32>,
    pub width: f32,
    pub height: f32,
}

/// Circle radius sized to the label, within sane bounds.
fn radius_for(label: &str) -> f32 {
    let chars = label.chars().count() as f32;
    (16.0 + chars * 4.5).clamp(22.0, 80.0)
}

pub fn layout(graph: &Graph) -> Layout {
    let layers = assign_layers(graph);
    let radii: Vec<f32> = graph.nodes.iter().map(|n| radius_for(&n.label)).collect();

    // Group nodes by layer, preserving declaration order.
    let layer_count = layers.iter().copied().max().map_or(0, |m| m + 1);
    let mut rows: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
    for (node, &layer) in layers.iter().enumerate() {
        rows[layer].push(node);
    }

    let row_width = |row: &[usize]| -> f32 {
        let diameters: f32 = row.iter().map(|&n| 2.0 * radii[n]).sum();
        diameters + NODE_GAP * (row.len().saturating_sub(1)) as f32
    };
    let content_width = rows.iter().map(|row| row_width(row)).fold(0.0, f32::max);
    let width = content_width + 2.0 * MARGIN;

    let mut positions = vec![(0.0, 0.0); graph.nodes.len()];
    let mut y = MARGIN;
    for row in &rows {
        let row_height = row.iter().map(|&n| 2.0 * radii[n]).fold(0.0, f32::max);
        let mut x = MARGIN + (content_width - row_width(row)) / 2.0;
        for &node in row {
            positions[node] = (x + radii[node], y + row_height / 2.0);
            x += 2.0 * radii[node] + NODE_GAP;
        }
        y += row_height + LAYER_GAP;
    }
    let height = (y - LAYER_GAP + MARGIN).max(2.0 * MARGIN);

    match graph.direction {
        Direction::TopDown => Layout {
            positions,
            radii,
            width,
            height,
        },
        // Same placement, transposed.
        Direction::LeftRight => Layout {
            positions: positions.into_iter().map(|(x, y)| (y, x)).collect(),
            radii,
            width: height,
            height: width,
        },
    }
}

/// Longest-path layering via Kahn's ordering. Nodes left over by a cycle are
/// appended to a trailing layer in declaration order.
fn assign_layers(graph: &Graph) -> Vec<usize> {
    let node_count = graph.nodes.len();
    let mut indegree = vec![0usize; node_count];
    for edge in &graph.edges {
        if edge.from != edge.to {
            indegree[edge.to] += 1;
        }
    }

    let mut layers = vec![0usize; node_count];
    let mut placed = vec![false; node_count];
    let mut queue: Vec<usize> = (0..node_count).filter(|&n| indegree[n] == 0).collect();
    let mut head = 0;

    while head < queue.len() {
        let node = queue[head];
        head += 1;
        placed[node] = true;
        for edge in &graph.edges {
            if edge.from != node || edge.from == edge.to {
                continue;
            }
            layers[edge.to] = layers[edge.to].max(layers[node] + 1);
            indegree[edge.to] -= 1;
            if indegree[edge.to] == 0 {
                queue.push(edge.to);
            }
        }
    }

    if placed.iter().any(|&p| !p) {
        let trailing = layers
            .iter()
            .zip(&placed)
            .filter(|(_, &p)| p)
            .map(|(&l, _)| l + 1)
            .max()
            .unwrap_or(0);
        for node in 0..node_count {
            if !placed[node] {
                layers[node] = trailing;
            }
        }
    }

    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::parser::parse;

    #[test]
    fn successors_land_on_deeper_layers() {
        let graph = parse("flowchart TD\nA --> B\nB --> C\nA --> C").unwrap();
        let layers = assign_layers(&graph);
        assert_eq!(layers, vec![0, 1, 2]);
    }

    #[test]
    fn top_down_layout_increases_y_along_edges() {
        let graph = parse("flowchart TD\nA --> B").unwrap();
        let layout = layout(&graph);
        assert!(layout.positions[0].1 < layout.positions[1].1);
        assert!(layout.width > 0.0 && layout.height > 0.0);
    }

    #[test]
    fn left_right_layout_increases_x_along_edges() {
        let graph = parse("flowchart LR\nA --> B").unwrap();
        let layout = layout(&graph);
        assert!(layout.positions[0].0 < layout.positions[1].0);
    }

    #[test]
    fn cycle_members_are_still_placed() {
        let graph = parse("flowchart TD\nA --> B\nB --> A\nC --> A").unwrap();
        let layers = assign_layers(&graph);
        assert_eq!(layers.len(), 3);
        // C is the only root; the cycle members trail it.
        assert!(layers[0] > layers[2]);
        assert!(layers[1] > layers[2]);
    }

    #[test]
    fn longer_labels_get_larger_circles() {
        assert!(radius_for("감사위원회 위원장") > radius_for("CFO"));
    }
}
