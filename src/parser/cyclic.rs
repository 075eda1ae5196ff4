//! Cyclic builder: materialises a scanned [`RingForm`] into atoms and bonds.
//!
//! The build chains a skeleton `A-B-C-...` through the locant space (reusing
//! pre-placed heteroatoms), hangs broken locants off their relative parents,
//! and then closes one fusion bond per component by walking the existing
//! graph. The walk always prefers the neighbour with the highest locant; a
//! completed pseudo jump installs a shortcut that overrides that preference,
//! and broken locants queued on a component's start are spliced onto the
//! front of its path before the closing bond is chosen.

use std::collections::{HashMap, HashSet, VecDeque};

use super::ring::RingForm;
use crate::core::error::ParseErrorKind;
use crate::core::graph::{CODE_ELEMENT, WlnGraph};
use crate::core::{
    AtomId, Locant, MAX_LOCANT, RingId, is_broken, locant_from_index, locant_index,
};

/// Largest regular ring position; anything higher collides with the broken
/// locant range.
const MAX_RING_POSITION: usize = 64;

/// Iteration bound for the bind-resolution loops, comfortably past the
/// locant space.
const FUSE_GUARD: usize = 600;

/// Builds the ring system and returns its final size.
pub(crate) fn build(
    graph: &mut WlnGraph,
    ring: RingId,
    form: &RingForm,
) -> Result<usize, ParseErrorKind> {
    let local_size = compute_size(form)?;

    // Skeleton chain with per-position connection budgets.
    let mut allowed: HashMap<Locant, u8> = HashMap::new();
    let mut prev: Option<AtomId> = None;
    for position in 1..=local_size {
        let loc = locant_from_index(position);
        let budget = if position == 1 || position == local_size {
            2
        } else {
            1
        };
        allowed.insert(loc, budget);

        let curr = match graph.ring(ring).locants.get(&loc).copied() {
            Some(atom) => {
                match graph.symbol(atom).code {
                    b'X' => {
                        if let Some(b) = allowed.get_mut(&loc) {
                            *b += 1;
                        }
                    }
                    CODE_ELEMENT => {
                        // allow octahedral geometry
                        allowed.insert(loc, 6);
                    }
                    _ => {}
                }
                if !graph.ring(ring).locant_of.contains_key(&atom) {
                    graph.ring_mut(ring).locant_of.insert(atom, loc);
                }
                atom
            }
            None => {
                let atom = graph.add_symbol(b'C', 4)?;
                graph.assign_locant(ring, loc, atom);
                atom
            }
        };

        if form.bridges.contains(&loc) {
            if let Some(b) = allowed.get_mut(&loc) {
                if *b > 0 {
                    *b -= 1;
                }
            }
        }
        if let Some(p) = prev {
            graph.add_edge(curr, p)?;
        }
        prev = Some(curr);
    }

    let mut broken_lookup: HashMap<Locant, VecDeque<Locant>> = HashMap::new();
    set_up_broken(graph, ring, form, &mut broken_lookup, &mut allowed)?;
    let mut pseudo_lookup = set_up_pseudo(form)?;

    let mut spawned: HashSet<Locant> = HashSet::new();
    let mut shortcuts: HashSet<Locant> = HashSet::new();
    let mut pseudo_pairs = form.pseudo.len() / 2;
    let component_count = form.components.len();

    for (index, &(comp_size, start)) in form.components.iter().enumerate() {
        let aromatic = form.aromaticity.get(index).copied().unwrap_or(false);
        let mut bind_1 = start;
        let mut path_atom = graph
            .ring(ring)
            .locants
            .get(&bind_1)
            .copied()
            .ok_or_else(|| {
                ParseErrorKind::RingClosure("out of bounds locant access in cyclic builder".into())
            })?;

        // Any pseudo pair left on the final component closes directly.
        if index == component_count - 1 && pseudo_pairs > 0 {
            let mut caught = false;
            for s in 1..=local_size {
                let pbind_2 = locant_from_index(s);
                let Some(&pbind_1) = pseudo_lookup.get(&pbind_2) else {
                    continue;
                };
                let second = graph.ring(ring).locants.get(&pbind_2).copied();
                let first = graph.ring(ring).locants.get(&pbind_1).copied();
                if let (Some(second), Some(first)) = (second, first) {
                    if graph.search_edge(second, first).is_none() {
                        graph.add_edge(second, first)?;
                        caught = true;
                    }
                }
            }
            if caught {
                break;
            }
        }

        if comp_size == 0 {
            return Err(ParseErrorKind::RingClosure("empty ring component".into()));
        }
        let mut ring_path: Vec<Locant> = vec![0; comp_size];
        let mut path_size = 0usize;
        ring_path[path_size] = graph
            .ring(ring)
            .locant_of
            .get(&path_atom)
            .copied()
            .unwrap_or(0);
        path_size += 1;
        let mut bind_2: Locant = 0;

        while path_size < comp_size {
            let mut highest: Locant = 0;
            for (_, child) in graph.children(path_atom) {
                let Some(&child_loc) = graph.ring(ring).locant_of.get(&child) else {
                    continue;
                };
                if is_broken(child_loc) && !spawned.contains(&child_loc) {
                    // skip broken children not yet spawned into a ring
                    continue;
                }
                if shortcuts.contains(&child_loc) {
                    highest = child_loc;
                    break;
                }
                if child_loc >= highest {
                    highest = child_loc;
                }
            }

            if highest == 0 {
                let at = graph
                    .ring(ring)
                    .locant_of
                    .get(&path_atom)
                    .copied()
                    .unwrap_or(0);
                if locant_index(at) == local_size {
                    // Overshot the last ring atom; duplicate it and let the
                    // bind resolution roll the path back.
                    highest = at;
                } else {
                    return Err(ParseErrorKind::RingClosure(format!(
                        "locant path formation is broken in ring definition - '{}'",
                        at as char
                    )));
                }
            }

            path_atom = graph
                .ring(ring)
                .locants
                .get(&highest)
                .copied()
                .ok_or_else(|| {
                    ParseErrorKind::RingClosure("walked onto a missing locant".into())
                })?;
            ring_path[path_size] = highest;
            path_size += 1;

            // A pseudo pair met mid-path terminates this component; the
            // recorded pair becomes the fusion bond and later walks may take
            // the shortcut.
            if path_size < comp_size && index != component_count - 1 {
                if let Some(&pb1) = pseudo_lookup.get(&highest) {
                    bind_1 = pb1;
                    bind_2 = highest;
                    path_size = comp_size;
                    ring_path.fill(0);
                    pseudo_lookup.remove(&highest);
                    if is_broken(bind_1) {
                        spawned.insert(bind_1);
                    }
                    shortcuts.insert(bind_1);
                    pseudo_pairs = pseudo_pairs.saturating_sub(1);
                    break;
                }
            }
            bind_2 = highest;
        }

        // Resolve the closing bond, splicing in queued broken locants and
        // shifting past exhausted budgets.
        let mut guard = 0usize;
        loop {
            guard += 1;
            if guard > FUSE_GUARD {
                return Err(ParseErrorKind::RingClosure("unresolvable fusion path".into()));
            }

            let has_broken = broken_lookup
                .get(&bind_1)
                .map(|queue| !queue.is_empty())
                .unwrap_or(false);
            if has_broken {
                let queue = broken_lookup.entry(bind_1).or_default();
                while queue
                    .front()
                    .map(|loc| spawned.contains(loc))
                    .unwrap_or(false)
                {
                    queue.pop_front();
                }
                let Some(bloc) = queue.pop_front() else {
                    continue;
                };
                bind_1 = bloc;
                for a in (1..path_size).rev() {
                    ring_path[a] = ring_path[a - 1];
                }
                ring_path[0] = bind_1;
                spawned.insert(bind_1);
                if ring_path[path_size - 1] != 0 {
                    bind_2 = ring_path[path_size - 1];
                }
            } else if allowed.get(&bind_1).copied().unwrap_or(0) > 0 {
                while allowed.get(&bind_2).copied().unwrap_or(0) == 0 || bind_2 == bind_1 {
                    if bind_2 >= MAX_LOCANT {
                        return Err(ParseErrorKind::RingClosure(
                            "fusion bond target ran out of locants".into(),
                        ));
                    }
                    bind_2 += 1;
                    ring_path[path_size - 1] = bind_2;
                }

                let second = graph.ring(ring).locants.get(&bind_2).copied();
                let first = graph.ring(ring).locants.get(&bind_1).copied();
                let (second, first) = second.zip(first).ok_or_else(|| {
                    ParseErrorKind::RingClosure("fusing locants outside the ring".into())
                })?;
                graph.add_edge(second, first)?;

                if let Some(b) = allowed.get_mut(&bind_1) {
                    *b -= 1;
                }
                if let Some(b) = allowed.get_mut(&bind_2) {
                    if *b > 0 {
                        *b -= 1;
                    }
                }
                break;
            } else {
                if bind_1 >= MAX_LOCANT {
                    return Err(ParseErrorKind::RingClosure(
                        "fusion bond source ran out of locants".into(),
                    ));
                }
                bind_1 += 1;
                if !ring_path[..path_size].contains(&bind_1) {
                    for a in (1..path_size).rev() {
                        ring_path[a] = ring_path[a - 1];
                    }
                    ring_path[0] = bind_1;
                    bind_2 = ring_path[path_size - 1];
                }
            }
        }

        if aromatic {
            for &loc in ring_path[..path_size].iter() {
                if loc == 0 {
                    continue;
                }
                if let Some(atom) = graph.ring(ring).locants.get(&loc).copied() {
                    graph.symbol_mut(atom).aromatic = true;
                    graph.ring_mut(ring).aromatic_atoms = 1;
                }
            }
            for a in 0..path_size {
                for b in (a + 1)..path_size {
                    let (la, lb) = (ring_path[a], ring_path[b]);
                    if la == 0 || lb == 0 {
                        continue;
                    }
                    let src = graph.ring(ring).locants.get(&la).copied();
                    let trg = graph.ring(ring).locants.get(&lb).copied();
                    if let (Some(src), Some(trg)) = (src, trg) {
                        if graph.symbol(src).aromatic && graph.symbol(trg).aromatic {
                            if let Some(edge) = graph.search_edge(src, trg) {
                                graph.edge_mut(edge).aromatic = true;
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(local_size)
}

/// Total size: the explicit specifier, or component sizes fused pairwise
/// minus bridge and broken adjustments.
fn compute_size(form: &RingForm) -> Result<usize, ParseErrorKind> {
    let size = match form.size_spec {
        Some(spec) => locant_index(spec),
        None => {
            let mut size = 0usize;
            for &(comp_size, _) in &form.components {
                if size > 0 {
                    size += comp_size.saturating_sub(2);
                } else {
                    size = comp_size;
                }
            }
            size.saturating_sub(form.bridges.len() + form.broken.len())
        }
    };
    if !(3..=MAX_RING_POSITION).contains(&size) {
        return Err(ParseErrorKind::RingClosure(format!(
            "calculated ring size {size} is unbuildable"
        )));
    }
    Ok(size)
}

/// Creates broken-locant atoms, bonds them to their relative parents, and
/// queues them for path splicing.
fn set_up_broken(
    graph: &mut WlnGraph,
    ring: RingId,
    form: &RingForm,
    broken_lookup: &mut HashMap<Locant, VecDeque<Locant>>,
    allowed: &mut HashMap<Locant, u8>,
) -> Result<(), ParseErrorKind> {
    for &loc in &form.broken {
        let parent = broken_parent(loc)?;
        if graph.ring(ring).locants.contains_key(&loc) {
            return Err(ParseErrorKind::RingClosure(
                "branching locants are overlapping created elements already in the locant path"
                    .into(),
            ));
        }
        allowed.insert(loc, 3);
        if let Some(b) = allowed.get_mut(&parent) {
            if *b > 0 {
                *b -= 1;
            }
        }

        let atom = graph.add_symbol(b'C', 4)?;
        graph.assign_locant(ring, loc, atom);
        broken_lookup.entry(parent).or_default().push_back(loc);

        let parent_atom = graph
            .ring(ring)
            .locants
            .get(&parent)
            .copied()
            .ok_or_else(|| {
                ParseErrorKind::LocantOutOfRange(
                    "broken locant has no parent position in the ring".into(),
                )
            })?;
        graph.add_edge(atom, parent_atom)?;
    }
    Ok(())
}

/// Decodes the relative parent of a broken position: one 23-step is an
/// alternative branch on the same parent, two or three land on the previous
/// broken level, and deeper trees are rejected.
fn broken_parent(loc: Locant) -> Result<Locant, ParseErrorKind> {
    let mut origin = loc as i32;
    let mut steps = 0usize;
    while origin - 23 > 128 {
        origin -= 23;
        steps += 1;
    }
    match steps {
        0 | 1 => Ok((origin - 64) as Locant),
        2 | 3 => Ok(origin as Locant),
        _ => Err(ParseErrorKind::LocantOutOfRange(
            "non-locant links past a two-level tree are unsuitable for this parser".into(),
        )),
    }
}

/// Registers `/XY` pairs as second-to-first lookups for the fusion walk.
fn set_up_pseudo(form: &RingForm) -> Result<HashMap<Locant, Locant>, ParseErrorKind> {
    let mut lookup = HashMap::new();
    if form.pseudo.is_empty() {
        return Ok(lookup);
    }
    if form.pseudo.len() % 2 != 0 {
        return Err(ParseErrorKind::RingClosure(
            "uneven pairs read for pseudo locants".into(),
        ));
    }
    for pair in form.pseudo.chunks(2) {
        lookup.insert(pair[1], pair[0]);
    }
    Ok(lookup)
}
