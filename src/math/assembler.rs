/// Which parametric axes close back on themselves.
///
/// `rows` joins the last row of samples to the first, `cols` does the same
/// for columns. Both set gives torus topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wrap {
    pub rows: bool,
    pub cols: bool,
}

impl Wrap {
    pub const NONE: Self = Self {
        rows: false,
        cols: false,
    };
    pub const ROWS: Self = Self {
        rows: true,
        cols: false,
    };
    pub const COLS: Self = Self {
        rows: false,
        cols: true,
    };
    pub const BOTH: Self = Self {
        rows: true,
        cols: true,
    };
}

fn cell_span(count: usize, wrapped: bool) -> usize {
    if wrapped { count } else { count - 1 }
}

/// Number of triangles [`assemble_indices`] emits for this grid.
pub fn triangle_count(rows: usize, cols: usize, wrap: Wrap) -> usize {
    if rows < 2 || cols < 2 {
        return 0;
    }
    cell_span(rows, wrap.rows) * cell_span(cols, wrap.cols) * 2
}

/// Triangle list over a row-major `rows × cols` sample grid.
///
/// Cell `(i, j)` with corners a=(i,j), b=(i+1,j), c=(i,j+1), d=(i+1,j+1)
/// becomes `(a, b, d)` and `(a, d, c)`, so every front face points along
/// `∂f/∂u × ∂f/∂v`. Grids thinner than 2 on either axis have no cells.
pub fn assemble_indices(rows: usize, cols: usize, wrap: Wrap) -> Vec<u32> {
    let mut indices = Vec::with_capacity(triangle_count(rows, cols, wrap) * 3);
    if rows < 2 || cols < 2 {
        return indices;
    }

    let index = |i: usize, j: usize| (i * cols + j) as u32;

    for i in 0..cell_span(rows, wrap.rows) {
        let next_i = (i + 1) % rows;
        for j in 0..cell_span(cols, wrap.cols) {
            let next_j = (j + 1) % cols;

            let a = index(i, j);
            let b = index(next_i, j);
            let c = index(i, next_j);
            let d = index(next_i, next_j);

            indices.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }

    indices
}
