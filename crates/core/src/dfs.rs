//! Depth-first walk over a [`RegionGraph`] reported as a stream of events.

use super::graph::RegionGraph;

/// One step of a depth-first walk, in node indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfsEvent {
    /// The walk entered a vertex for the first time.
    Discover(usize),
    /// The walk is looking along the edge `source → target`.
    Examine { source: usize, target: usize },
    /// The examined edge closes a cycle: `target` is an ancestor of `source`
    /// on the current DFS path (the tree edge back to the parent excluded).
    BackEdge { source: usize, target: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// DFS frame: the vertex, its tree parent and the next adjacency slot to examine.
struct Frame {
    vertex: usize,
    parent: Option<usize>,
    next_edge: usize,
    end: usize,
}

/// Walks the component containing `start` depth-first and feeds every event
/// to `visit`.
///
/// The walk is iterative and mirrors the classic color-map visitor order: a
/// vertex is examined edge by edge in adjacency order; a white target is
/// discovered right after its edge is examined and explored before the
/// parent's remaining edges. Each undirected edge is examined from both ends;
/// the reverse of the tree edge a vertex was discovered through is never a
/// back edge.
///
/// Does nothing if `start` is not a node index of `graph`.
pub fn depth_first_walk<F>(graph: &RegionGraph, start: usize, mut visit: F)
where
    F: FnMut(DfsEvent),
{
    if start >= graph.num_nodes() {
        return;
    }

    let mut color = vec![Color::White; graph.num_nodes()];
    let mut stack: Vec<Frame> = Vec::new();

    color[start] = Color::Gray;
    visit(DfsEvent::Discover(start));
    stack.push(Frame {
        vertex: start,
        parent: None,
        next_edge: graph.node_pointers[start],
        end: graph.node_pointers[start + 1],
    });

    while let Some(frame) = stack.last_mut() {
        if frame.next_edge == frame.end {
            color[frame.vertex] = Color::Black;
            stack.pop();
            continue;
        }

        let source = frame.vertex;
        let parent = frame.parent;
        let target = graph.edge_targets[frame.next_edge];
        frame.next_edge += 1;

        visit(DfsEvent::Examine { source, target });

        match color[target] {
            Color::White => {
                color[target] = Color::Gray;
                visit(DfsEvent::Discover(target));
                stack.push(Frame {
                    vertex: target,
                    parent: Some(source),
                    next_edge: graph.node_pointers[target],
                    end: graph.node_pointers[target + 1],
                });
            }
            Color::Gray if parent != Some(target) => {
                visit(DfsEvent::BackEdge { source, target });
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::{Location, LocationId};
    use std::collections::BTreeSet;

    fn graph(n: LocationId, pairs: &[(LocationId, LocationId)]) -> RegionGraph {
        let locations = (0..n)
            .map(|id| Location {
                id,
                name: String::new(),
                security: 0.0,
                ship_kills: 0,
                npc_kills: 0,
                jumps: 0,
            })
            .collect();
        let edges: BTreeSet<_> = pairs.iter().copied().collect();
        RegionGraph::from_parts(locations, edges).unwrap()
    }

    fn events(g: &RegionGraph, start: usize) -> Vec<DfsEvent> {
        let mut out = Vec::new();
        depth_first_walk(g, start, |e| out.push(e));
        out
    }

    #[test]
    fn triangle_event_order() {
        use DfsEvent::*;
        let g = graph(3, &[(0, 1), (1, 2), (0, 2)]);

        assert_eq!(
            events(&g, 0),
            vec![
                Discover(0),
                Examine { source: 0, target: 1 },
                Discover(1),
                Examine { source: 1, target: 0 },
                Examine { source: 1, target: 2 },
                Discover(2),
                Examine { source: 2, target: 0 },
                BackEdge { source: 2, target: 0 },
                Examine { source: 2, target: 1 },
                Examine { source: 0, target: 2 },
            ]
        );
    }

    #[test]
    fn tree_has_no_back_edges() {
        let g = graph(5, &[(0, 1), (0, 2), (1, 3), (1, 4)]);

        let evs = events(&g, 0);

        assert!(!evs.iter().any(|e| matches!(e, DfsEvent::BackEdge { .. })));
        let discovered = evs
            .iter()
            .filter(|e| matches!(e, DfsEvent::Discover(_)))
            .count();
        assert_eq!(discovered, 5);
    }

    #[test]
    fn every_edge_examined_from_both_ends() {
        let g = graph(4, &[(0, 1), (1, 2), (2, 3), (0, 3), (0, 2)]);

        let examined = events(&g, 0)
            .iter()
            .filter(|e| matches!(e, DfsEvent::Examine { .. }))
            .count();

        assert_eq!(examined, 2 * g.num_edges());
    }

    #[test]
    fn walk_stays_in_start_component() {
        let g = graph(4, &[(0, 1), (2, 3)]);

        let discovered: Vec<usize> = events(&g, 2)
            .into_iter()
            .filter_map(|e| match e {
                DfsEvent::Discover(v) => Some(v),
                _ => None,
            })
            .collect();

        assert_eq!(discovered, vec![2, 3]);
    }

    #[test]
    fn isolated_start_only_discovers_itself() {
        let g = graph(2, &[]);
        assert_eq!(events(&g, 1), vec![DfsEvent::Discover(1)]);
    }

    #[test]
    fn out_of_range_start_emits_nothing() {
        let g = graph(2, &[(0, 1)]);
        assert!(events(&g, 5).is_empty());
    }

    #[test]
    fn square_with_chord_reports_one_back_edge_per_non_tree_edge() {
        // 4 vertices, 5 edges: spanning tree has 3, so 2 cycle-closing edges.
        let g = graph(4, &[(0, 1), (1, 2), (2, 3), (0, 3), (0, 2)]);

        let back_edges = events(&g, 0)
            .iter()
            .filter(|e| matches!(e, DfsEvent::BackEdge { .. }))
            .count();

        assert_eq!(back_edges, 2);
    }
}
