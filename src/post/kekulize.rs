//! Kekulé assignment: alternating double bonds over each ring's aromatic
//! subgraph.
//!
//! Per ring, an adjacency matrix of aromatic-adjacent positions with spare
//! valence is matched: bipartite systems go through an augmenting-path
//! matcher, odd systems fall back to general (Blossom) matching. Every
//! matched pair upgrades its single bond to a double.

use std::collections::VecDeque;

use crate::core::error::ParseErrorKind;
use crate::core::graph::WlnGraph;
use crate::core::{RingId, locant_from_index, locant_index};

/// Kekulises every ring carrying aromatic atoms.
pub(crate) fn kekulize(graph: &mut WlnGraph) -> Result<(), ParseErrorKind> {
    for index in 0..graph.rings.len() {
        if graph.rings[index].aromatic_atoms == 0 {
            continue;
        }
        kekulize_ring(graph, RingId(index))?;
    }
    Ok(())
}

fn kekulize_ring(graph: &mut WlnGraph, ring: RingId) -> Result<(), ParseErrorKind> {
    let size = graph.ring(ring).size;
    if size == 0 {
        return Ok(());
    }

    let adj = fill_adjacency(graph, ring, size);
    if !adj.iter().any(|&cell| cell) {
        return Ok(());
    }

    let mate = match two_color(&adj, size) {
        Some(colors) => bipartite_matching(&adj, size, &colors),
        None => {
            let mut blossom = Blossom::new(size);
            for u in 0..size {
                for v in (u + 1)..size {
                    if adj[u * size + v] {
                        blossom.add_edge(u, v);
                    }
                }
            }
            blossom.solve();
            blossom.mate
        }
    };

    for u in 0..size {
        let v = mate[u];
        if v < 0 || (u as i32) >= v {
            continue;
        }
        let first = graph
            .ring(ring)
            .locants
            .get(&locant_from_index(u + 1))
            .copied();
        let second = graph
            .ring(ring)
            .locants
            .get(&locant_from_index(v as usize + 1))
            .copied();
        if let (Some(first), Some(second)) = (first, second) {
            if let Some(edge) = graph.search_edge(first, second) {
                if graph.edge(edge).order == 1 {
                    graph.unsaturate(edge, 1)?;
                }
            }
        }
    }
    Ok(())
}

/// Builds the aromatic adjacency matrix: positions whose atoms are aromatic,
/// below their ceiling, joined by an unsaturated aromatic edge, and not
/// sulfur.
fn fill_adjacency(graph: &WlnGraph, ring: RingId, size: usize) -> Vec<bool> {
    let mut adj = vec![false; size * size];
    let record = graph.ring(ring);

    for row in 0..size {
        let Some(&atom) = record.locants.get(&locant_from_index(row + 1)) else {
            continue;
        };
        let sym = graph.symbol(atom);
        if sym.code == b'S' || !sym.aromatic || !sym.is_open() {
            continue;
        }
        for (edge_id, child) in graph.children(atom) {
            let edge = graph.edge(edge_id);
            let child_sym = graph.symbol(child);
            if child_sym.code == b'S' || edge.order > 1 {
                continue;
            }
            if !(child_sym.aromatic && edge.aromatic && child_sym.is_open()) {
                continue;
            }
            let Some(&child_loc) = record.locant_of.get(&child) else {
                continue;
            };
            let col = match locant_index(child_loc).checked_sub(1) {
                Some(col) if col < size => col,
                _ => continue,
            };
            adj[row * size + col] = true;
            adj[col * size + row] = true;
        }
    }
    adj
}

/// Two-colours the adjacency graph; `None` when an odd cycle makes it
/// non-bipartite.
fn two_color(adj: &[bool], size: usize) -> Option<Vec<u8>> {
    let mut colors = vec![u8::MAX; size];
    for start in 0..size {
        if colors[start] != u8::MAX {
            continue;
        }
        colors[start] = 0;
        let mut queue = VecDeque::from([start]);
        while let Some(u) = queue.pop_front() {
            for v in 0..size {
                if !adj[u * size + v] {
                    continue;
                }
                if colors[v] == u8::MAX {
                    colors[v] = 1 - colors[u];
                    queue.push_back(v);
                } else if colors[v] == colors[u] {
                    return None;
                }
            }
        }
    }
    Some(colors)
}

/// Maximum matching on a two-coloured graph via augmenting paths.
fn bipartite_matching(adj: &[bool], size: usize, colors: &[u8]) -> Vec<i32> {
    let mut mate = vec![-1i32; size];
    for u in 0..size {
        if colors[u] != 0 || mate[u] != -1 {
            continue;
        }
        let mut seen = vec![false; size];
        augment(adj, size, u, &mut seen, &mut mate);
    }
    mate
}

fn augment(adj: &[bool], size: usize, u: usize, seen: &mut [bool], mate: &mut [i32]) -> bool {
    for v in 0..size {
        if !adj[u * size + v] || seen[v] {
            continue;
        }
        seen[v] = true;
        if mate[v] < 0 || augment(adj, size, mate[v] as usize, seen, mate) {
            mate[v] = u as i32;
            mate[u] = v as i32;
            return true;
        }
    }
    false
}

/// General maximum matching (blossom contraction) for non-bipartite aromatic
/// systems.
struct Blossom {
    n: usize,
    mate: Vec<i32>,
    b: Vec<Vec<i32>>,
    p: Vec<i32>,
    d: Vec<i32>,
    bl: Vec<i32>,
    g: Vec<Vec<i32>>,
}

impl Blossom {
    fn new(n: usize) -> Self {
        let m = n + n / 2;
        Self {
            n,
            mate: vec![-1; n],
            b: vec![Vec::new(); m],
            p: vec![0; m],
            d: vec![0; m],
            bl: vec![0; m],
            g: vec![vec![-1; m]; m],
        }
    }

    fn add_edge(&mut self, u: usize, v: usize) {
        self.g[u][v] = u as i32;
        self.g[v][u] = v as i32;
    }

    fn match_pair(&mut self, u: usize, v: usize) {
        self.g[u][v] = -1;
        self.g[v][u] = -1;
        self.mate[u] = v as i32;
        self.mate[v] = u as i32;
    }

    fn trace(&self, mut x: usize) -> Vec<i32> {
        let mut path = Vec::new();
        loop {
            while self.bl[x] as usize != x {
                x = self.bl[x] as usize;
            }
            if !path.is_empty() && *path.last().unwrap_or(&-1) == x as i32 {
                break;
            }
            path.push(x as i32);
            x = self.p[x] as usize;
        }
        path
    }

    fn contract(&mut self, c: usize, vx: &mut Vec<i32>, vy: &mut Vec<i32>) {
        self.b[c].clear();
        let mut r = vx.last().copied().unwrap_or(-1);
        while !vx.is_empty() && !vy.is_empty() && vx.last() == vy.last() {
            r = vx.last().copied().unwrap_or(-1);
            vx.pop();
            vy.pop();
        }
        self.b[c].push(r);
        self.b[c].extend(vx.iter().rev());
        self.b[c].extend(vy.iter().rev());

        for i in 0..=c {
            self.g[c][i] = -1;
            self.g[i][c] = -1;
        }
        let members = self.b[c].clone();
        for &z in &members {
            let z = z as usize;
            self.bl[z] = c as i32;
            for i in 0..c {
                if self.g[z][i] != -1 {
                    self.g[c][i] = z as i32;
                    self.g[i][c] = self.g[i][z];
                }
            }
        }
    }

    fn lift(&self, path: &mut Vec<i32>) -> Vec<i32> {
        let mut lifted: Vec<i32> = Vec::new();
        while path.len() >= 2 {
            let z = match path.pop() {
                Some(z) => z,
                None => break,
            };
            if (z as usize) < self.n {
                lifted.push(z);
                continue;
            }
            let z = z as usize;
            let w = path.last().copied().unwrap_or(-1);
            let i = if lifted.len() % 2 == 0 {
                self.b[z]
                    .iter()
                    .position(|&e| e == self.g[z][w as usize])
                    .unwrap_or(0)
            } else {
                0
            };
            let j = if lifted.len() % 2 == 1 {
                let back = lifted.last().copied().unwrap_or(-1);
                self.b[z]
                    .iter()
                    .position(|&e| e == self.g[z][back as usize])
                    .unwrap_or(0)
            } else {
                0
            };
            let k = self.b[z].len();
            let odd_step = if lifted.len() % 2 == 0 {
                i % 2 == 1
            } else {
                j % 2 == 0
            };
            let dif = if odd_step { 1 } else { k - 1 };
            let mut i = i;
            while i != j {
                path.push(self.b[z][i]);
                i = (i + dif) % k;
            }
            path.push(self.b[z][i]);
        }
        lifted
    }

    fn solve(&mut self) {
        loop {
            self.d.fill(0);
            let mut queue: VecDeque<usize> = VecDeque::new();
            for i in 0..self.bl.len() {
                self.bl[i] = i as i32;
            }
            for i in 0..self.n {
                if self.mate[i] == -1 {
                    queue.push_back(i);
                    self.p[i] = i as i32;
                    self.d[i] = 1;
                }
            }

            let mut c = self.n;
            let mut aug = false;
            while let Some(x) = queue.pop_front() {
                if aug {
                    break;
                }
                if self.bl[x] as usize != x {
                    continue;
                }
                for y in 0..c {
                    if self.bl[y] as usize != y || self.g[x][y] == -1 {
                        continue;
                    }
                    if self.d[y] == 0 {
                        self.p[y] = x as i32;
                        self.d[y] = 2;
                        let my = self.mate[y] as usize;
                        self.p[my] = y as i32;
                        self.d[my] = 1;
                        queue.push_back(my);
                    } else if self.d[y] == 1 {
                        let mut vx = self.trace(x);
                        let mut vy = self.trace(y);
                        if vx.last() == vy.last() {
                            self.contract(c, &mut vx, &mut vy);
                            queue.push_back(c);
                            self.p[c] = self.p[self.b[c][0] as usize];
                            self.d[c] = 1;
                            c += 1;
                        } else {
                            aug = true;
                            vx.insert(0, y as i32);
                            vy.insert(0, x as i32);
                            let mut path = self.lift(&mut vx);
                            let other = self.lift(&mut vy);
                            path.extend(other.iter().rev());
                            let mut i = 0;
                            while i + 1 < path.len() {
                                self.match_pair(path[i] as usize, path[i + 1] as usize);
                                if i + 2 < path.len() {
                                    self.add_edge(path[i + 1] as usize, path[i + 2] as usize);
                                }
                                i += 2;
                            }
                        }
                        break;
                    }
                }
            }

            if !aug {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ParseOptions;
    use crate::parser;

    fn kekulized(notation: &str) -> WlnGraph {
        let mut graph = parser::parse(notation, &ParseOptions::default()).unwrap();
        kekulize(&mut graph).unwrap();
        graph
    }

    fn double_bond_count(graph: &WlnGraph) -> usize {
        graph.edges.iter().filter(|e| e.order == 2).count()
    }

    #[test]
    fn benzene_takes_three_alternating_doubles() {
        let graph = kekulized("L6J");
        assert_eq!(double_bond_count(&graph), 3);
        // every atom carries exactly one double bond
        for sym in &graph.symbols {
            assert_eq!(sym.num_edges, 3);
        }
    }

    #[test]
    fn pyridine_matches_perfectly() {
        let graph = kekulized("T6NJ");
        assert_eq!(double_bond_count(&graph), 3);
    }

    #[test]
    fn pyrrole_nitrogen_stays_single_bonded() {
        let graph = kekulized("T5MJ");
        assert_eq!(double_bond_count(&graph), 2);
        let nitrogen = graph
            .symbols
            .iter()
            .find(|s| s.code == b'M')
            .unwrap();
        assert_eq!(nitrogen.num_edges, 2);
    }

    #[test]
    fn naphthalene_matches_five_doubles() {
        let graph = kekulized("L66J");
        assert_eq!(double_bond_count(&graph), 5);
    }

    #[test]
    fn odd_aromatic_ring_leaves_one_atom_unmatched() {
        // cyclopentadienyl-style five-ring with a pi charge
        let graph = kekulized("T5 0J");
        assert_eq!(double_bond_count(&graph), 2);
    }

    #[test]
    fn saturated_rings_are_untouched() {
        let graph = kekulized("L6TJ");
        assert_eq!(double_bond_count(&graph), 0);
    }

    #[test]
    fn bipartite_matcher_covers_even_cycles() {
        let size = 6;
        let mut adj = vec![false; size * size];
        for i in 0..size {
            let j = (i + 1) % size;
            adj[i * size + j] = true;
            adj[j * size + i] = true;
        }
        let colors = two_color(&adj, size).unwrap();
        let mate = bipartite_matching(&adj, size, &colors);
        assert!(mate.iter().all(|&m| m >= 0));
    }

    #[test]
    fn blossom_matches_odd_cycle_maximally() {
        let size = 5;
        let mut blossom = Blossom::new(size);
        for i in 0..size {
            blossom.add_edge(i, (i + 1) % size);
        }
        blossom.solve();
        let matched = blossom.mate.iter().filter(|&&m| m >= 0).count();
        assert_eq!(matched, 4);
    }

    #[test]
    fn odd_cycle_is_not_two_colorable() {
        let size = 5;
        let mut adj = vec![false; size * size];
        for i in 0..size {
            let j = (i + 1) % size;
            adj[i * size + j] = true;
            adj[j * size + i] = true;
        }
        assert!(two_color(&adj, size).is_none());
    }
}
