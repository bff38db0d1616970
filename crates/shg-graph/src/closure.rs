use shg_core::errors::{graph_error, HyperError};
use shg_core::StarSemiring;

/// Reflexive transitive closure `A* = I ⊕ A ⊕ A² ⊕ …` of a square matrix.
///
/// Lehmann's generalization of Floyd–Warshall: `n` elimination rounds, each
/// routing paths through one more intermediate vertex and closing its
/// self-loops with `star`. Entry `(i, j)` of the result sums the weights of
/// all paths from `i` to `j`. Unlike the DAG traversals, cycles are fine
/// here.
pub fn kleene<W: StarSemiring>(matrix: &[Vec<W>]) -> Result<Vec<Vec<W>>, HyperError> {
    let n = matrix.len();
    if let Some((row, bad)) = matrix.iter().enumerate().find(|(_, row)| row.len() != n) {
        return Err(graph_error("non-square-matrix", "closure requires a square matrix")
            .with_context("rows", n)
            .with_context("row", row)
            .with_context("columns", bad.len()));
    }

    let mut current: Vec<Vec<W>> = matrix.to_vec();
    for k in 0..n {
        let loop_closure = current[k][k].star();
        let mut next = current.clone();
        for i in 0..n {
            let through = current[i][k].mul(&loop_closure);
            if through.is_zero() {
                continue;
            }
            for j in 0..n {
                next[i][j].add_assign(&through.mul(&current[k][j]));
            }
        }
        current = next;
    }

    for (i, row) in current.iter_mut().enumerate() {
        row[i].add_assign(&W::one());
    }
    Ok(current)
}
