use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use futoshiki_csp::{
    board::Slot,
    csp::Csp,
    error::Result,
    model::{binary::build_binary_model, nary::build_nary_model, VariableGrid},
    solver::{
        propagate::{ArcConsistency, ForwardChecking, Propagator},
        solution::Solution,
        strategy::{BacktrackingSearch, SearchStrategy},
    },
};

type BuildFn = fn(&[Vec<Slot>]) -> Result<(Csp, VariableGrid)>;

// A 5x5 instance derived from the cyclic Latin square: a handful of fixed
// cells and markers consistent with it, so every configuration under test
// finds a solution.
fn sample_board() -> Vec<Vec<Slot>> {
    serde_json::from_str(
        r#"[
            [1,".",0,"<",0,".",0,".",5],
            [0,"<",0,".",0,".",0,">",0],
            [0,".",0,".",5,".",0,".",0],
            [0,".",5,".",0,".",0,"<",0],
            [5,".",0,".",0,"<",0,".",0]
        ]"#,
    )
    .unwrap()
}

fn bench_model_construction(c: &mut Criterion) {
    let rows = sample_board();
    let mut group = c.benchmark_group("model_construction_5x5");
    group.bench_function("binary", |b| {
        b.iter(|| build_binary_model(black_box(&rows)).unwrap())
    });
    group.bench_function("nary", |b| {
        b.iter(|| build_nary_model(black_box(&rows)).unwrap())
    });
    group.finish();
}

fn bench_solving(c: &mut Criterion) {
    let rows = sample_board();
    let mut group = c.benchmark_group("solve_5x5");

    let models: [(&str, BuildFn); 2] = [
        ("binary", build_binary_model),
        ("nary", build_nary_model),
    ];
    for (model_name, build) in models {
        for propagation in ["fc", "gac"] {
            group.bench_with_input(
                BenchmarkId::new(model_name, propagation),
                &rows,
                |b, rows| {
                    b.iter(|| {
                        let (csp, _grid) = build(rows).unwrap();
                        let propagator: Box<dyn Propagator> = match propagation {
                            "fc" => Box::new(ForwardChecking),
                            _ => Box::new(ArcConsistency),
                        };
                        let solver = BacktrackingSearch::with_defaults(propagator);
                        let (solution, _) = solver.solve(&csp, Solution::initial(&csp)).unwrap();
                        assert!(solution.is_some());
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_model_construction, bench_solving);
criterion_main!(benches);
