//! Maximum weight matching for general (non-bipartite) graphs.
//!
//! Primal-dual augmenting-path algorithm with blossom contraction, in the
//! O(n^3) formulation of Galil (1986) as arranged by van Rantwijk. The
//! solver always runs in maximum-cardinality mode: it first maximizes the
//! number of matched pairs, then the total weight among matchings of that
//! cardinality, which is exactly what pairing a social pool needs (everyone
//! who can be paired is paired, even at negative weight).
//!
//! Outline: each node carries a dual variable; edges whose endpoint duals
//! sum to their (doubled) weight are tight and form the search graph.
//! Alternating trees are grown from exposed nodes along tight edges. An
//! odd cycle met during the search is contracted into a blossom super-node
//! so the search can continue; blossoms are expanded again on augmentation
//! and when their dual drops to zero. When the search is stuck, duals are
//! adjusted by the minimum slack to make a new edge tight. At termination,
//! complementary slackness holds, certifying the optimum.

use crate::core::graph::CandidateGraph;
use crate::models::Matching;

/// Sentinel for "no vertex / no endpoint / no edge".
const NONE: usize = usize::MAX;

const LABEL_FREE: u8 = 0;
const LABEL_S: u8 = 1;
const LABEL_T: u8 = 2;
/// Breadcrumb bit set on S-blossoms while scanning for a common ancestor.
const LABEL_CRUMB: u8 = 4;

/// Compute a maximum-cardinality, maximum-weight matching of the graph.
///
/// Deterministic: the traversal order is fixed by node/edge input order, so
/// identical graphs yield identical matchings. There is no failure mode on
/// well-formed finite graphs; weights may be negative or zero.
pub fn maximum_weight_matching(graph: &CandidateGraph) -> Matching {
    let n = graph.node_count();
    if n == 0 || graph.edge_count() == 0 {
        return Matching::new(vec![None; n]);
    }

    let mut solver = Solver::new(n, graph.edges());
    let mate = solver.solve();
    Matching::new(
        mate.into_iter()
            .map(|m| (m != NONE).then_some(m))
            .collect(),
    )
}

/// Working state for one solve. Indices 0..n are vertices; n..2n are
/// blossom slots. Endpoint index p refers to edge p/2 seen from side p%2.
struct Solver {
    nvertex: usize,
    edges: Vec<(usize, usize, f64)>,
    /// endpoint[p] = vertex at endpoint p of edge p/2.
    endpoint: Vec<usize>,
    /// neighbend[v] = endpoints p such that endpoint[p ^ 1] == v.
    neighbend: Vec<Vec<usize>>,
    /// mate[v] = endpoint of v's partner during the run, NONE if exposed.
    mate: Vec<usize>,
    /// label[b] for vertices and top-level blossoms: free, S, or T.
    label: Vec<u8>,
    /// labelend[b] = endpoint through which b acquired its label.
    labelend: Vec<usize>,
    /// inblossom[v] = top-level blossom containing v (v itself if trivial).
    inblossom: Vec<usize>,
    blossomparent: Vec<usize>,
    blossomchilds: Vec<Vec<usize>>,
    blossombase: Vec<usize>,
    /// blossomendps[b] = endpoints connecting successive children of b.
    blossomendps: Vec<Vec<usize>>,
    /// bestedge[b] = least-slack edge from b to a different S-blossom.
    bestedge: Vec<usize>,
    /// For non-trivial S-blossoms: least-slack edges to other S-blossoms.
    blossombestedges: Vec<Option<Vec<usize>>>,
    unusedblossoms: Vec<usize>,
    /// dualvar[0..n] = vertex duals, dualvar[n..2n] = blossom duals.
    dualvar: Vec<f64>,
    allowedge: Vec<bool>,
    queue: Vec<usize>,
}

impl Solver {
    fn new(nvertex: usize, edge_list: &[(usize, usize, f64)]) -> Self {
        let nedge = edge_list.len();
        let edges = edge_list.to_vec();

        let mut endpoint = Vec::with_capacity(2 * nedge);
        for &(i, j, _) in &edges {
            endpoint.push(i);
            endpoint.push(j);
        }

        let mut neighbend = vec![Vec::new(); nvertex];
        for (k, &(i, j, _)) in edges.iter().enumerate() {
            neighbend[i].push(2 * k + 1);
            neighbend[j].push(2 * k);
        }

        // Initial vertex duals: the maximum edge weight, so every maximum
        // weight edge starts out tight.
        let maxweight = edges.iter().map(|&(_, _, w)| w).fold(0.0, f64::max);
        let mut dualvar = vec![maxweight; nvertex];
        dualvar.extend(std::iter::repeat(0.0).take(nvertex));

        Self {
            nvertex,
            edges,
            endpoint,
            neighbend,
            mate: vec![NONE; nvertex],
            label: vec![LABEL_FREE; 2 * nvertex],
            labelend: vec![NONE; 2 * nvertex],
            inblossom: (0..nvertex).collect(),
            blossomparent: vec![NONE; 2 * nvertex],
            blossomchilds: vec![Vec::new(); 2 * nvertex],
            blossombase: (0..nvertex).chain(std::iter::repeat(NONE).take(nvertex)).collect(),
            blossomendps: vec![Vec::new(); 2 * nvertex],
            bestedge: vec![NONE; 2 * nvertex],
            blossombestedges: vec![None; 2 * nvertex],
            unusedblossoms: (nvertex..2 * nvertex).collect(),
            dualvar,
            allowedge: vec![false; nedge],
            queue: Vec::new(),
        }
    }

    /// Slack of edge k: dual sum minus doubled weight. Zero means tight.
    fn slack(&self, k: usize) -> f64 {
        let (i, j, wt) = self.edges[k];
        self.dualvar[i] + self.dualvar[j] - 2.0 * wt
    }

    /// Leaf vertices of blossom b, in child order.
    fn blossom_leaves(&self, b: usize) -> Vec<usize> {
        if b < self.nvertex {
            return vec![b];
        }
        let mut leaves = Vec::new();
        for &t in &self.blossomchilds[b] {
            leaves.extend(self.blossom_leaves(t));
        }
        leaves
    }

    /// Label vertex w (and its top-level blossom) as S or T, reached
    /// through endpoint p. S-blossoms feed the scan queue; labelling a
    /// T-blossom immediately labels its mate as S.
    fn assign_label(&mut self, w: usize, t: u8, p: usize) {
        let b = self.inblossom[w];
        debug_assert!(self.label[w] == LABEL_FREE && self.label[b] == LABEL_FREE);
        self.label[w] = t;
        self.label[b] = t;
        self.labelend[w] = p;
        self.labelend[b] = p;
        self.bestedge[w] = NONE;
        self.bestedge[b] = NONE;
        if t == LABEL_S {
            self.queue.extend(self.blossom_leaves(b));
        } else if t == LABEL_T {
            let base = self.blossombase[b];
            debug_assert!(self.mate[base] != NONE);
            self.assign_label(self.endpoint[self.mate[base]], LABEL_S, self.mate[base] ^ 1);
        }
    }

    /// Trace back from v and w towards the roots of their alternating
    /// trees. Returns the base vertex of the first common ancestor blossom,
    /// or NONE if v and w sit in different trees (an augmenting path).
    fn scan_blossom(&mut self, v: usize, w: usize) -> usize {
        let mut path = Vec::new();
        let mut base = NONE;
        let mut v = v;
        let mut w = w;
        while v != NONE || w != NONE {
            let mut b = self.inblossom[v];
            if self.label[b] & LABEL_CRUMB != 0 {
                base = self.blossombase[b];
                break;
            }
            debug_assert_eq!(self.label[b], LABEL_S);
            path.push(b);
            self.label[b] = LABEL_S | LABEL_CRUMB;
            debug_assert_eq!(self.labelend[b], self.mate[self.blossombase[b]]);
            if self.labelend[b] == NONE {
                // Root of this tree reached.
                v = NONE;
            } else {
                v = self.endpoint[self.labelend[b]];
                b = self.inblossom[v];
                debug_assert_eq!(self.label[b], LABEL_T);
                debug_assert!(self.labelend[b] != NONE);
                v = self.endpoint[self.labelend[b]];
            }
            if w != NONE {
                std::mem::swap(&mut v, &mut w);
            }
        }
        for b in path {
            self.label[b] = LABEL_S;
        }
        base
    }

    /// Contract the odd cycle through edge k and the common ancestor with
    /// base vertex `base` into a new blossom.
    fn add_blossom(&mut self, base: usize, k: usize) {
        let (mut v, mut w, _) = self.edges[k];
        let bb = self.inblossom[base];
        let mut bv = self.inblossom[v];
        let mut bw = self.inblossom[w];

        let b = self.unusedblossoms.pop().expect("blossom slots exhausted");
        self.blossombase[b] = base;
        self.blossomparent[b] = NONE;
        self.blossomparent[bb] = b;

        // Walk both sides of the cycle down to the base.
        let mut path = Vec::new();
        let mut endps = Vec::new();
        while bv != bb {
            self.blossomparent[bv] = b;
            path.push(bv);
            endps.push(self.labelend[bv]);
            debug_assert!(
                self.label[bv] == LABEL_T
                    || (self.label[bv] == LABEL_S
                        && self.labelend[bv] == self.mate[self.blossombase[bv]])
            );
            debug_assert!(self.labelend[bv] != NONE);
            v = self.endpoint[self.labelend[bv]];
            bv = self.inblossom[v];
        }
        path.push(bb);
        path.reverse();
        endps.reverse();
        endps.push(2 * k);
        while bw != bb {
            self.blossomparent[bw] = b;
            path.push(bw);
            endps.push(self.labelend[bw] ^ 1);
            debug_assert!(
                self.label[bw] == LABEL_T
                    || (self.label[bw] == LABEL_S
                        && self.labelend[bw] == self.mate[self.blossombase[bw]])
            );
            debug_assert!(self.labelend[bw] != NONE);
            w = self.endpoint[self.labelend[bw]];
            bw = self.inblossom[w];
        }
        // Install the child list before touching leaves or best edges.
        self.blossomchilds[b] = path;
        self.blossomendps[b] = endps;

        debug_assert_eq!(self.label[bb], LABEL_S);
        self.label[b] = LABEL_S;
        self.labelend[b] = self.labelend[bb];
        self.dualvar[b] = 0.0;

        for leaf in self.blossom_leaves(b) {
            if self.label[self.inblossom[leaf]] == LABEL_T {
                // Former T-vertices become S-vertices inside the blossom.
                self.queue.push(leaf);
            }
            self.inblossom[leaf] = b;
        }

        // Recompute least-slack edges to neighbouring S-blossoms.
        let mut bestedgeto = vec![NONE; 2 * self.nvertex];
        let path = self.blossomchilds[b].clone();
        for &bv in &path {
            let nblists: Vec<Vec<usize>> = match self.blossombestedges[bv].take() {
                Some(list) => vec![list],
                None => self
                    .blossom_leaves(bv)
                    .into_iter()
                    .map(|leaf| self.neighbend[leaf].iter().map(|&p| p / 2).collect())
                    .collect(),
            };
            for nblist in nblists {
                for k in nblist {
                    let (mut i, mut j, _) = self.edges[k];
                    if self.inblossom[j] == b {
                        std::mem::swap(&mut i, &mut j);
                    }
                    let bj = self.inblossom[j];
                    if bj != b
                        && self.label[bj] == LABEL_S
                        && (bestedgeto[bj] == NONE || self.slack(k) < self.slack(bestedgeto[bj]))
                    {
                        bestedgeto[bj] = k;
                    }
                }
            }
            self.bestedge[bv] = NONE;
        }
        let best: Vec<usize> = bestedgeto.into_iter().filter(|&k| k != NONE).collect();
        self.bestedge[b] = NONE;
        for &k in &best {
            if self.bestedge[b] == NONE || self.slack(k) < self.slack(self.bestedge[b]) {
                self.bestedge[b] = k;
            }
        }
        self.blossombestedges[b] = Some(best);
    }

    /// Expand blossom b, turning its children back into top-level
    /// blossoms. During a stage (`endstage == false`) a T-blossom's
    /// children along the entry-to-base path inherit labels so the
    /// alternating tree stays intact.
    fn expand_blossom(&mut self, b: usize, endstage: bool) {
        let childs = self.blossomchilds[b].clone();
        for &s in &childs {
            self.blossomparent[s] = NONE;
            if s < self.nvertex {
                self.inblossom[s] = s;
            } else if endstage && self.dualvar[s] == 0.0 {
                // Recursively expand sub-blossoms whose dual is exhausted.
                self.expand_blossom(s, endstage);
            } else {
                for leaf in self.blossom_leaves(s) {
                    self.inblossom[leaf] = s;
                }
            }
        }

        if !endstage && self.label[b] == LABEL_T {
            let endps = self.blossomendps[b].clone();
            let len = childs.len() as i64;
            let at = |list: &[usize], j: i64| -> usize { list[j.rem_euclid(len) as usize] };

            // Walk from the entry child to the base, relabelling along the
            // even-length side of the cycle.
            debug_assert!(self.labelend[b] != NONE);
            let entrychild = self.inblossom[self.endpoint[self.labelend[b] ^ 1]];
            let mut j = childs.iter().position(|&c| c == entrychild).expect("entry child in blossom") as i64;
            let (jstep, endptrick): (i64, usize) = if j & 1 != 0 {
                j -= len;
                (1, 0)
            } else {
                (-1, 1)
            };
            let mut p = self.labelend[b];
            while j != 0 {
                // Relabel the T-sub-blossom.
                self.label[self.endpoint[p ^ 1]] = LABEL_FREE;
                self.label[self.endpoint[at(&endps, j - endptrick as i64) ^ endptrick ^ 1]] =
                    LABEL_FREE;
                self.assign_label(self.endpoint[p ^ 1], LABEL_T, p);
                // Step past the consecutive S-sub-blossom.
                self.allowedge[at(&endps, j - endptrick as i64) / 2] = true;
                j += jstep;
                p = at(&endps, j - endptrick as i64) ^ endptrick;
                self.allowedge[p / 2] = true;
                j += jstep;
            }
            // The base sub-blossom keeps the T-label without stepping
            // through to its mate.
            let bv = at(&childs, j);
            self.label[self.endpoint[p ^ 1]] = LABEL_T;
            self.label[bv] = LABEL_T;
            self.labelend[self.endpoint[p ^ 1]] = p;
            self.labelend[bv] = p;
            self.bestedge[bv] = NONE;
            // The other side of the cycle goes unlabelled unless one of its
            // vertices was reached from outside the expanding blossom.
            j += jstep;
            while at(&childs, j) != entrychild {
                let bv = at(&childs, j);
                if self.label[bv] == LABEL_S {
                    j += jstep;
                    continue;
                }
                let mut labelled = NONE;
                for leaf in self.blossom_leaves(bv) {
                    if self.label[leaf] != LABEL_FREE {
                        labelled = leaf;
                        break;
                    }
                }
                if labelled != NONE {
                    debug_assert_eq!(self.label[labelled], LABEL_T);
                    debug_assert_eq!(self.inblossom[labelled], bv);
                    self.label[labelled] = LABEL_FREE;
                    self.label[self.endpoint[self.mate[self.blossombase[bv]]]] = LABEL_FREE;
                    let le = self.labelend[labelled];
                    self.assign_label(labelled, LABEL_T, le);
                }
                j += jstep;
            }
        }

        // Retire the blossom slot.
        self.label[b] = LABEL_FREE;
        self.labelend[b] = NONE;
        self.blossomchilds[b].clear();
        self.blossomendps[b].clear();
        self.blossombase[b] = NONE;
        self.blossombestedges[b] = None;
        self.bestedge[b] = NONE;
        self.unusedblossoms.push(b);
    }

    /// Swap matched and unmatched edges along the path inside blossom b
    /// from vertex v to the base, then rotate the child list so v's
    /// sub-blossom becomes the new base.
    fn augment_blossom(&mut self, b: usize, v: usize) {
        let mut t = v;
        while self.blossomparent[t] != b {
            t = self.blossomparent[t];
        }
        if t >= self.nvertex {
            self.augment_blossom(t, v);
        }

        let childs = self.blossomchilds[b].clone();
        let endps = self.blossomendps[b].clone();
        let len = childs.len() as i64;
        let at = |list: &[usize], j: i64| -> usize { list[j.rem_euclid(len) as usize] };

        let i = childs.iter().position(|&c| c == t).expect("sub-blossom in blossom") as i64;
        let mut j = i;
        let (jstep, endptrick): (i64, usize) = if i & 1 != 0 {
            j -= len;
            (1, 0)
        } else {
            (-1, 1)
        };
        while j != 0 {
            j += jstep;
            let t = at(&childs, j);
            let p = at(&endps, j - endptrick as i64) ^ endptrick;
            if t >= self.nvertex {
                self.augment_blossom(t, self.endpoint[p]);
            }
            j += jstep;
            let t = at(&childs, j);
            if t >= self.nvertex {
                self.augment_blossom(t, self.endpoint[p ^ 1]);
            }
            self.mate[self.endpoint[p]] = p ^ 1;
            self.mate[self.endpoint[p ^ 1]] = p;
        }

        let i = i as usize;
        self.blossomchilds[b].rotate_left(i);
        self.blossomendps[b].rotate_left(i);
        self.blossombase[b] = self.blossombase[self.blossomchilds[b][0]];
        debug_assert_eq!(self.blossombase[b], v);
    }

    /// Augment the matching along the path through tight edge k and up the
    /// alternating trees from both of its endpoints.
    fn augment_matching(&mut self, k: usize) {
        let (v, w, _) = self.edges[k];
        for (s, p) in [(v, 2 * k + 1), (w, 2 * k)] {
            let mut s = s;
            let mut p = p;
            loop {
                let bs = self.inblossom[s];
                debug_assert_eq!(self.label[bs], LABEL_S);
                debug_assert_eq!(self.labelend[bs], self.mate[self.blossombase[bs]]);
                if bs >= self.nvertex {
                    self.augment_blossom(bs, s);
                }
                self.mate[s] = p;
                if self.labelend[bs] == NONE {
                    // Tree root: an exposed vertex.
                    break;
                }
                let t = self.endpoint[self.labelend[bs]];
                let bt = self.inblossom[t];
                debug_assert_eq!(self.label[bt], LABEL_T);
                debug_assert!(self.labelend[bt] != NONE);
                s = self.endpoint[self.labelend[bt]];
                let j = self.endpoint[self.labelend[bt] ^ 1];
                debug_assert_eq!(self.blossombase[bt], t);
                if bt >= self.nvertex {
                    self.augment_blossom(bt, j);
                }
                self.mate[j] = self.labelend[bt];
                p = self.labelend[bt] ^ 1;
            }
        }
    }

    /// Run the main loop. Returns mate as a vertex index per vertex
    /// (NONE for unmatched).
    fn solve(&mut self) -> Vec<usize> {
        let nvertex = self.nvertex;

        // Each stage tries to raise the matching cardinality by one.
        for _ in 0..nvertex {
            self.label.iter_mut().for_each(|l| *l = LABEL_FREE);
            self.bestedge.iter_mut().for_each(|e| *e = NONE);
            self.blossombestedges[nvertex..]
                .iter_mut()
                .for_each(|e| *e = None);
            self.allowedge.iter_mut().for_each(|a| *a = false);
            self.queue.clear();

            for v in 0..nvertex {
                if self.mate[v] == NONE && self.label[self.inblossom[v]] == LABEL_FREE {
                    self.assign_label(v, LABEL_S, NONE);
                }
            }

            let mut augmented = false;
            loop {
                // Scan S-vertices along tight edges until the queue runs
                // dry or the matching is augmented.
                while let Some(v) = if augmented { None } else { self.queue.pop() } {
                    debug_assert_eq!(self.label[self.inblossom[v]], LABEL_S);
                    let neighbors = self.neighbend[v].clone();
                    for p in neighbors {
                        let k = p / 2;
                        let w = self.endpoint[p];
                        if self.inblossom[v] == self.inblossom[w] {
                            // Internal blossom edge: ignore.
                            continue;
                        }
                        let mut kslack = 0.0;
                        if !self.allowedge[k] {
                            kslack = self.slack(k);
                            if kslack <= 0.0 {
                                self.allowedge[k] = true;
                            }
                        }
                        if self.allowedge[k] {
                            if self.label[self.inblossom[w]] == LABEL_FREE {
                                // C1: grow the tree with a T-vertex.
                                self.assign_label(w, LABEL_T, p ^ 1);
                            } else if self.label[self.inblossom[w]] == LABEL_S {
                                // C2: S-S edge; either a blossom or an
                                // augmenting path.
                                let base = self.scan_blossom(v, w);
                                if base != NONE {
                                    self.add_blossom(base, k);
                                } else {
                                    self.augment_matching(k);
                                    augmented = true;
                                    break;
                                }
                            } else if self.label[w] == LABEL_FREE {
                                // w is inside a labelled T-blossom but has
                                // no label of its own yet.
                                debug_assert_eq!(self.label[self.inblossom[w]], LABEL_T);
                                self.label[w] = LABEL_T;
                                self.labelend[w] = p ^ 1;
                            }
                        } else if self.label[self.inblossom[w]] == LABEL_S {
                            let b = self.inblossom[v];
                            if self.bestedge[b] == NONE || kslack < self.slack(self.bestedge[b]) {
                                self.bestedge[b] = k;
                            }
                        } else if self.label[w] == LABEL_FREE {
                            if self.bestedge[w] == NONE || kslack < self.slack(self.bestedge[w]) {
                                self.bestedge[w] = k;
                            }
                        }
                    }
                }
                if augmented {
                    break;
                }

                // No augmenting path along tight edges: adjust duals by the
                // minimum slack across boundary edges.
                let mut deltatype = 0u8;
                let mut delta = 0.0;
                let mut deltaedge = NONE;
                let mut deltablossom = NONE;

                // Type 2: least slack to an unlabelled vertex.
                for v in 0..nvertex {
                    if self.label[self.inblossom[v]] == LABEL_FREE && self.bestedge[v] != NONE {
                        let d = self.slack(self.bestedge[v]);
                        if deltatype == 0 || d < delta {
                            delta = d;
                            deltatype = 2;
                            deltaedge = self.bestedge[v];
                        }
                    }
                }
                // Type 3: half the least slack between S-blossoms.
                for b in 0..2 * nvertex {
                    if self.blossomparent[b] == NONE
                        && self.label[b] == LABEL_S
                        && self.bestedge[b] != NONE
                    {
                        let d = self.slack(self.bestedge[b]) / 2.0;
                        if deltatype == 0 || d < delta {
                            delta = d;
                            deltatype = 3;
                            deltaedge = self.bestedge[b];
                        }
                    }
                }
                // Type 4: least dual of a top-level T-blossom.
                for b in nvertex..2 * nvertex {
                    if self.blossombase[b] != NONE
                        && self.blossomparent[b] == NONE
                        && self.label[b] == LABEL_T
                        && (deltatype == 0 || self.dualvar[b] < delta)
                    {
                        delta = self.dualvar[b];
                        deltatype = 4;
                        deltablossom = b;
                    }
                }
                if deltatype == 0 {
                    // No further improvement possible anywhere; make one
                    // final adjustment that keeps vertex duals non-negative
                    // and stop the stage. Maximum cardinality is reached.
                    deltatype = 1;
                    let min_dual = self.dualvar[..nvertex]
                        .iter()
                        .cloned()
                        .fold(f64::INFINITY, f64::min);
                    delta = min_dual.max(0.0);
                }

                for v in 0..nvertex {
                    match self.label[self.inblossom[v]] {
                        LABEL_S => self.dualvar[v] -= delta,
                        LABEL_T => self.dualvar[v] += delta,
                        _ => {}
                    }
                }
                for b in nvertex..2 * nvertex {
                    if self.blossombase[b] != NONE && self.blossomparent[b] == NONE {
                        match self.label[b] {
                            LABEL_S => self.dualvar[b] += delta,
                            LABEL_T => self.dualvar[b] -= delta,
                            _ => {}
                        }
                    }
                }

                match deltatype {
                    1 => break,
                    2 => {
                        self.allowedge[deltaedge] = true;
                        let (i, j, _) = self.edges[deltaedge];
                        let i = if self.label[self.inblossom[i]] == LABEL_FREE {
                            j
                        } else {
                            i
                        };
                        debug_assert_eq!(self.label[self.inblossom[i]], LABEL_S);
                        self.queue.push(i);
                    }
                    3 => {
                        self.allowedge[deltaedge] = true;
                        let (i, _, _) = self.edges[deltaedge];
                        debug_assert_eq!(self.label[self.inblossom[i]], LABEL_S);
                        self.queue.push(i);
                    }
                    _ => self.expand_blossom(deltablossom, false),
                }
            }

            if !augmented {
                break;
            }

            // End of stage: expand S-blossoms whose dual is exhausted.
            for b in nvertex..2 * nvertex {
                if self.blossomparent[b] == NONE
                    && self.blossombase[b] != NONE
                    && self.label[b] == LABEL_S
                    && self.dualvar[b] == 0.0
                {
                    self.expand_blossom(b, true);
                }
            }
        }

        // Convert mate endpoints back to vertex indices.
        let mut mate = vec![NONE; nvertex];
        for v in 0..nvertex {
            if self.mate[v] != NONE {
                mate[v] = self.endpoint[self.mate[v]];
            }
        }
        for v in 0..nvertex {
            debug_assert!(mate[v] == NONE || mate[mate[v]] == v);
        }
        mate
    }
}
