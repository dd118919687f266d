//! Adjacency views, iterators and removal cursors.
//!
//! Views borrow the graph and walk a vertex's chains lazily, so `len` and
//! `get` are O(degree). An [`EdgeCursor`] holds no borrow and can be
//! advanced and used to remove edges between calls.

use strand_core::{EdgeIndex, VertexIndex};

use crate::graph::Graph;

/// One of the two chains rooted at a vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Chain {
    Incoming,
    Outgoing,
}

/// Which edges of a vertex an adjacency view covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Edges whose target is the vertex.
    Incoming,
    /// Edges whose source is the vertex.
    Outgoing,
    /// Incoming edges followed by outgoing edges.
    Both,
}

impl Direction {
    fn first_chain(self) -> Chain {
        match self {
            Self::Incoming | Self::Both => Chain::Incoming,
            Self::Outgoing => Chain::Outgoing,
        }
    }

    fn chain_after(self, chain: Chain) -> Option<Chain> {
        match (self, chain) {
            (Self::Both, Chain::Incoming) => Some(Chain::Outgoing),
            _ => None,
        }
    }
}

/// Edges of one vertex in one [`Direction`].
#[derive(Clone, Copy)]
pub struct Adjacency<'g> {
    graph: &'g Graph,
    vertex: VertexIndex,
    direction: Direction,
}

impl<'g> Adjacency<'g> {
    pub(crate) fn new(graph: &'g Graph, vertex: VertexIndex, direction: Direction) -> Self {
        Self {
            graph,
            vertex,
            direction,
        }
    }

    /// The vertex whose edges this view covers.
    pub fn vertex(&self) -> VertexIndex {
        self.vertex
    }

    /// Number of edges. Walks the chain.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the vertex has no edges in this direction.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// The `i`-th edge in chain order.
    pub fn get(&self, i: usize) -> Option<EdgeIndex> {
        self.iter().nth(i)
    }

    /// Iterate edges in chain order.
    pub fn iter(&self) -> AdjacencyIter<'g> {
        AdjacencyIter {
            graph: self.graph,
            cursor: self.cursor(),
        }
    }

    /// A detached cursor over the same edges, for removal while iterating.
    pub fn cursor(&self) -> EdgeCursor {
        EdgeCursor::new(self.vertex, self.direction)
    }
}

impl<'g> IntoIterator for Adjacency<'g> {
    type Item = EdgeIndex;
    type IntoIter = AdjacencyIter<'g>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for Adjacency<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over an [`Adjacency`] view.
pub struct AdjacencyIter<'g> {
    graph: &'g Graph,
    cursor: EdgeCursor,
}

impl Iterator for AdjacencyIter<'_> {
    type Item = EdgeIndex;

    fn next(&mut self) -> Option<EdgeIndex> {
        self.cursor.next(self.graph)
    }
}

/// Borrow-free iteration state over a vertex's edges.
///
/// The successor of each returned edge is read before the edge is handed
/// out, so removing the current edge (through
/// [`remove_current`](EdgeCursor::remove_current) or directly on the
/// graph) does not disturb the walk. Removing any other edge of the same
/// chain mid-walk does.
///
/// ```
/// use strand_arena::Layout;
/// use strand_graph::Graph;
///
/// let mut g = Graph::new(Layout::empty(), Layout::empty()).unwrap();
/// let a = g.add_vertex();
/// let b = g.add_vertex();
/// g.add_edge(a, b);
/// g.add_edge(a, a);
/// g.add_edge(b, a);
///
/// let mut cursor = g.outgoing_edges(a).cursor();
/// while let Some(e) = cursor.next(&g) {
///     if g.target(e) == b {
///         cursor.remove_current(&mut g);
///     }
/// }
/// assert_eq!(g.outgoing_edges(a).len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct EdgeCursor {
    vertex: VertexIndex,
    direction: Direction,
    /// Chain being walked, `None` once exhausted.
    chain: Option<Chain>,
    started: bool,
    current: Option<EdgeIndex>,
    next: Option<EdgeIndex>,
}

impl EdgeCursor {
    fn new(vertex: VertexIndex, direction: Direction) -> Self {
        Self {
            vertex,
            direction,
            chain: Some(direction.first_chain()),
            started: false,
            current: None,
            next: None,
        }
    }

    /// Advance to the next edge.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self, graph: &Graph) -> Option<EdgeIndex> {
        loop {
            let chain = self.chain?;
            let candidate = if self.started {
                self.next
            } else {
                self.started = true;
                graph.head(chain, self.vertex)
            };
            match candidate {
                Some(e) => {
                    self.next = graph.next_in_chain(chain, e);
                    self.current = Some(e);
                    return Some(e);
                }
                None => {
                    self.chain = self.direction.chain_after(chain);
                    self.started = false;
                    self.current = None;
                    self.next = None;
                }
            }
        }
    }

    /// The edge most recently returned by [`next`](EdgeCursor::next),
    /// unless it was removed since.
    pub fn current(&self) -> Option<EdgeIndex> {
        self.current
    }

    /// Remove the current edge from `graph`. Returns `false` if there is
    /// no current edge.
    pub fn remove_current(&mut self, graph: &mut Graph) -> bool {
        match self.current.take() {
            Some(e) => {
                graph.remove_edge(e);
                true
            }
            None => false,
        }
    }

    /// Forget the current edge without removing it, returning it.
    ///
    /// For callers that remove the edge through some other path.
    pub fn take_current(&mut self) -> Option<EdgeIndex> {
        self.current.take()
    }
}

/// Iterator over the edges from one vertex to another.
pub struct EdgesBetween<'g> {
    graph: &'g Graph,
    source: VertexIndex,
    target: VertexIndex,
    chain: Chain,
    next: Option<EdgeIndex>,
}

impl<'g> EdgesBetween<'g> {
    pub(crate) fn new(graph: &'g Graph, source: VertexIndex, target: VertexIndex) -> Self {
        let chain = shorter_chain(graph, source, target);
        let head = match chain {
            Chain::Outgoing => graph.head(Chain::Outgoing, source),
            Chain::Incoming => graph.head(Chain::Incoming, target),
        };
        Self {
            graph,
            source,
            target,
            chain,
            next: head,
        }
    }
}

impl Iterator for EdgesBetween<'_> {
    type Item = EdgeIndex;

    fn next(&mut self) -> Option<EdgeIndex> {
        while let Some(e) = self.next {
            self.next = self.graph.next_in_chain(self.chain, e);
            let hit = match self.chain {
                Chain::Outgoing => self.graph.target(e) == self.target,
                Chain::Incoming => self.graph.source(e) == self.source,
            };
            if hit {
                return Some(e);
            }
        }
        None
    }
}

/// Walk `source`'s outgoing and `target`'s incoming chains in lockstep
/// and pick whichever ends first.
fn shorter_chain(graph: &Graph, source: VertexIndex, target: VertexIndex) -> Chain {
    let mut out = graph.head(Chain::Outgoing, source);
    let mut inc = graph.head(Chain::Incoming, target);
    loop {
        match (out, inc) {
            (None, _) => return Chain::Outgoing,
            (_, None) => return Chain::Incoming,
            (Some(o), Some(i)) => {
                out = graph.next_in_chain(Chain::Outgoing, o);
                inc = graph.next_in_chain(Chain::Incoming, i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_arena::Layout;

    fn star() -> (Graph, VertexIndex, Vec<EdgeIndex>) {
        let mut g = Graph::new(Layout::empty(), Layout::empty()).unwrap();
        let hub = g.add_vertex();
        let mut edges = Vec::new();
        for _ in 0..4 {
            let leaf = g.add_vertex();
            edges.push(g.add_edge(hub, leaf));
        }
        (g, hub, edges)
    }

    #[test]
    fn view_len_and_get_follow_chain_order() {
        let (g, hub, edges) = star();
        let out = g.outgoing_edges(hub);
        assert_eq!(out.len(), 4);
        assert_eq!(out.get(0), Some(edges[3]));
        assert_eq!(out.get(3), Some(edges[0]));
        assert_eq!(out.get(4), None);
        assert!(g.incoming_edges(hub).is_empty());
    }

    #[test]
    fn both_lists_incoming_before_outgoing() {
        let (mut g, hub, edges) = star();
        let leaf = g.target(edges[0]);
        let back = g.add_edge(leaf, hub);
        let all: Vec<_> = g.edges(hub).into_iter().collect();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0], back);
    }

    #[test]
    fn cursor_removes_every_other_edge() {
        let (mut g, hub, edges) = star();
        let mut cursor = g.outgoing_edges(hub).cursor();
        let mut i = 0;
        while cursor.next(&g).is_some() {
            if i % 2 == 0 {
                assert!(cursor.remove_current(&mut g));
                assert!(!cursor.remove_current(&mut g));
            }
            i += 1;
        }
        let left: Vec<_> = g.outgoing_edges(hub).iter().collect();
        assert_eq!(left, vec![edges[2], edges[0]]);
    }

    #[test]
    fn cursor_drains_both_directions_with_self_loop() {
        let mut g = Graph::new(Layout::empty(), Layout::empty()).unwrap();
        let v = g.add_vertex();
        let w = g.add_vertex();
        g.add_edge(v, v);
        g.add_edge(w, v);
        g.add_edge(v, w);
        let mut cursor = g.edges(v).cursor();
        while cursor.next(&g).is_some() {
            cursor.remove_current(&mut g);
        }
        assert_eq!(g.edge_count(), 0);
        assert!(g.edges(w).is_empty());
    }

    #[test]
    fn edges_between_scans_either_chain() {
        let mut g = Graph::new(Layout::empty(), Layout::empty()).unwrap();
        let a = g.add_vertex();
        let b = g.add_vertex();
        let c = g.add_vertex();
        // a has a long outgoing chain, b a short incoming one.
        for _ in 0..5 {
            g.add_edge(a, c);
        }
        let ab = g.add_edge(a, b);
        assert_eq!(shorter_chain(&g, a, b), Chain::Incoming);
        assert_eq!(g.edges_between(a, b).collect::<Vec<_>>(), vec![ab]);
        // Now the other way round.
        for _ in 0..6 {
            g.add_edge(c, b);
        }
        assert_eq!(shorter_chain(&g, a, b), Chain::Outgoing);
        assert_eq!(g.edges_between(a, b).collect::<Vec<_>>(), vec![ab]);
        assert_eq!(g.edges_between(a, c).count(), 5);
    }
}
