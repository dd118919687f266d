//! Structural fingerprint for cheap graph comparison.
//!
//! FNV-1a over everything a collaborator can observe: live slot indices,
//! attribute payloads, adjacency chain order and property values. Two
//! graphs with equal fingerprints are almost certainly indistinguishable
//! through the public API. Not cryptographically secure.

use strand_core::PoolIndex;

use crate::adjacency::Chain;
use crate::graph::Graph;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Incremental FNV-1a state.
#[derive(Clone, Copy, Debug)]
struct Fnv1a(u64);

impl Fnv1a {
    fn new() -> Self {
        Self(FNV_OFFSET)
    }

    #[inline]
    fn byte(&mut self, byte: u8) {
        self.0 = (self.0 ^ byte as u64).wrapping_mul(FNV_PRIME);
    }

    #[inline]
    fn bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.byte(b);
        }
    }

    #[inline]
    fn u32(&mut self, v: u32) {
        self.bytes(&v.to_le_bytes());
    }

    /// Length-prefixed byte run, so adjacent runs cannot alias.
    fn run(&mut self, bytes: &[u8]) {
        self.u32(u32::try_from(bytes.len()).expect("hashed runs are capped at u32::MAX bytes"));
        self.bytes(bytes);
    }
}

impl Graph {
    /// 64-bit hash of the graph's observable state.
    ///
    /// Slot indices are part of the hash, so two graphs built by different
    /// operation sequences that ended up in different slots hash
    /// differently even when isomorphic.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a::new();

        h.u32(self.vertex_count() as u32);
        for v in self.vertices() {
            h.u32(v.raw());
            h.run(self.vertex_payload(v));
            for chain in [Chain::Outgoing, Chain::Incoming] {
                h.u32(self.chain(chain, v).count() as u32);
                for e in self.chain(chain, v) {
                    h.u32(e.raw());
                }
            }
            for (p, value) in self.vertex_properties_of(v) {
                h.u32(p.0 as u32);
                h.run(value);
            }
        }

        h.u32(self.edge_count() as u32);
        for e in self.all_edges() {
            h.u32(e.raw());
            h.u32(self.source(e).raw());
            h.u32(self.target(e).raw());
            h.run(self.edge_payload(e));
            for (p, value) in self.edge_properties_of(e) {
                h.u32(p.0 as u32);
                h.run(value);
            }
        }

        h.0
    }
}

#[cfg(test)]
mod tests {
    use strand_arena::Layout;

    use super::*;

    fn graph() -> Graph {
        let v = Layout::builder().i32("n").build().unwrap();
        Graph::new(v, Layout::empty()).unwrap()
    }

    #[test]
    fn empty_graphs_hash_equal() {
        assert_eq!(graph().fingerprint(), graph().fingerprint());
    }

    #[test]
    fn attribute_change_alters_fingerprint() {
        let mut g = graph();
        let v = g.add_vertex();
        let before = g.fingerprint();
        let n = g.vertex_attribute_id("n").unwrap();
        g.set_vertex_attribute(v, n, &1i32.to_le_bytes());
        assert_ne!(g.fingerprint(), before);
        g.set_vertex_attribute(v, n, &0i32.to_le_bytes());
        assert_eq!(g.fingerprint(), before);
    }

    #[test]
    fn chain_order_is_observed() {
        let mut a = graph();
        let mut b = graph();
        for g in [&mut a, &mut b] {
            g.add_vertex();
            g.add_vertex();
        }
        let (x, y) = (a.vertices().next().unwrap(), a.vertices().nth(1).unwrap());
        a.add_edge(x, y);
        a.add_edge(x, y);
        b.add_edge(x, y);
        b.insert_edge(x, 1, y, 1);
        // Same slots, same endpoints, different chain order.
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn property_values_are_observed() {
        let mut g = graph();
        let p = g.register_vertex_property("tag");
        let v = g.add_vertex();
        let before = g.fingerprint();
        g.set_vertex_property(v, p, b"");
        assert_ne!(g.fingerprint(), before);
    }
}
