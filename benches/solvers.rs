use criterion::{criterion_group, criterion_main, Criterion};
use itersol::{Gmres, Matrix, MatrixOp, Vector};

type MCpuNalgebra = nalgebra::DMatrix<f64>;
type MCpuFaer = faer::Mat<f64>;

// the 1d Laplacian stencil [-1, 2, -1] of size n, with a constant right-hand side
fn laplacian_problem<M: Matrix>(n: usize) -> (MatrixOp<M>, M::V) {
    let mut triplets = Vec::new();
    for i in 0..n {
        triplets.push((i, i, 2.0.into()));
        if i > 0 {
            triplets.push((i, i - 1, (-1.0).into()));
        }
        if i + 1 < n {
            triplets.push((i, i + 1, (-1.0).into()));
        }
    }
    let m = M::try_from_triplets(n, n, triplets).unwrap();
    let rhs = M::V::from_element(n, 1.0.into());
    (MatrixOp::new(m), rhs)
}

fn gmres_benchmarks(c: &mut Criterion) {
    let n = 64;

    let (op, rhs) = laplacian_problem::<MCpuNalgebra>(n);
    c.bench_function("gmres_laplacian_nalgebra_64", |b| {
        b.iter(|| Gmres::default().solve(&op, &rhs).unwrap())
    });

    let (op, rhs) = laplacian_problem::<MCpuFaer>(n);
    c.bench_function("gmres_laplacian_faer_64", |b| {
        b.iter(|| Gmres::default().solve(&op, &rhs).unwrap())
    });
}

criterion_group!(benches, gmres_benchmarks);
criterion_main!(benches);
