//! Minimum-weight perfect matching over defect sets.
//!
//! Each defect sector (X or Z) is matched independently. The matching
//! graph is the complete graph over the sector's defects, weighted by
//! taxicab distance, plus one private virtual proxy per defect priced
//! at that defect's distance to its nearest admissible boundary. A
//! defect paired with its proxy is routed off the patch instead of to
//! a partner.
//!
//! fusion-blossom requires even integer weights, so every distance is
//! doubled before it enters the graph.

use fusion_blossom::mwpm_solver::{PrimalDualSolver, SolverSerial};
use fusion_blossom::util::{SolverInitializer, SyndromePattern, VertexIndex, VertexNum, Weight};
use qec_core::error::QecError;

/// Where a defect was routed by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTarget {
    /// Paired with another defect of the same sector.
    Defect(usize),
    /// Routed off the nearest admissible boundary.
    Boundary,
}

/// A full matching of one defect sector.
#[derive(Debug, Clone)]
pub struct MatchingOutcome {
    /// Each pairing listed once: `(i, Defect(j))` always has `i < j`.
    pub pairs: Vec<(usize, MatchTarget)>,
    /// Total doubled weight of the chosen pairing.
    pub total_weight: Weight,
}

/// Match `n_defects` defects against each other and the boundary.
///
/// `boundary_distances[i]` is defect i's distance to its nearest
/// admissible boundary; `distance(i, j)` the taxicab distance between
/// defects i and j. Every defect comes back routed somewhere, or the
/// solver output was inconsistent and the trial must abort.
pub fn match_defects<F>(
    n_defects: usize,
    boundary_distances: &[usize],
    distance: F,
) -> Result<MatchingOutcome, QecError>
where
    F: Fn(usize, usize) -> usize,
{
    if n_defects == 0 {
        return Ok(MatchingOutcome {
            pairs: Vec::new(),
            total_weight: 0,
        });
    }

    let vertex_num = 2 * n_defects;
    let mut weighted_edges: Vec<(VertexIndex, VertexIndex, Weight)> = Vec::new();
    for i in 0..n_defects {
        for j in i + 1..n_defects {
            weighted_edges.push((
                i as VertexIndex,
                j as VertexIndex,
                2 * distance(i, j) as Weight,
            ));
        }
    }
    for (i, &dist) in boundary_distances.iter().enumerate() {
        weighted_edges.push((
            i as VertexIndex,
            (n_defects + i) as VertexIndex,
            2 * dist as Weight,
        ));
    }
    let virtual_vertices: Vec<VertexIndex> =
        (n_defects..vertex_num).map(|v| v as VertexIndex).collect();

    let initializer = SolverInitializer::new(
        vertex_num as VertexNum,
        weighted_edges.clone(),
        virtual_vertices,
    );
    let mut solver = SolverSerial::new(&initializer);
    let defect_vertices: Vec<VertexIndex> = (0..n_defects).map(|v| v as VertexIndex).collect();
    solver.solve(&SyndromePattern::new_vertices(defect_vertices));

    let mut partner: Vec<Option<MatchTarget>> = vec![None; n_defects];
    let mut total_weight: Weight = 0;
    for &edge_index in solver.subgraph().iter() {
        let (u, v, weight) = weighted_edges[edge_index as usize];
        total_weight += weight;
        let (u, v) = (u as usize, v as usize);
        if u < n_defects && v < n_defects {
            partner[u] = Some(MatchTarget::Defect(v));
            partner[v] = Some(MatchTarget::Defect(u));
        } else {
            // Proxy edges only ever touch their own defect.
            let real = if u < n_defects { u } else { v };
            partner[real] = Some(MatchTarget::Boundary);
        }
    }

    let mut pairs = Vec::new();
    for (i, target) in partner.iter().enumerate() {
        match target {
            None => return Err(QecError::UnmatchedDefect { index: i }),
            Some(MatchTarget::Defect(j)) if *j < i => {}
            Some(target) => pairs.push((i, *target)),
        }
    }
    Ok(MatchingOutcome {
        pairs,
        total_weight,
    })
}

/// Exhaustive minimum pairing weight, for checking the solver on small
/// defect sets. Same doubled-weight convention as [`match_defects`].
pub fn brute_force_min_weight<F>(
    n_defects: usize,
    boundary_distances: &[usize],
    distance: &F,
) -> Weight
where
    F: Fn(usize, usize) -> usize,
{
    let mut assigned = vec![false; n_defects];
    best_pairing_weight(&mut assigned, boundary_distances, distance)
}

fn best_pairing_weight<F>(assigned: &mut [bool], boundary_distances: &[usize], distance: &F) -> Weight
where
    F: Fn(usize, usize) -> usize,
{
    let Some(i) = assigned.iter().position(|&a| !a) else {
        return 0;
    };
    assigned[i] = true;
    let mut best =
        2 * boundary_distances[i] as Weight + best_pairing_weight(assigned, boundary_distances, distance);
    for j in i + 1..assigned.len() {
        if assigned[j] {
            continue;
        }
        assigned[j] = true;
        let cost =
            2 * distance(i, j) as Weight + best_pairing_weight(assigned, boundary_distances, distance);
        assigned[j] = false;
        best = best.min(cost);
    }
    assigned[i] = false;
    best
}
