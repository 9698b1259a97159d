/// Benchmarks for the exporters.
///
/// Run with: `cargo bench`
///
/// Each exporter is timed over synthetic compilation units of growing size,
/// plus the full pipeline sequentially and in parallel.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use java_code_analyzer::application::{standard_exporters, AnalyzeUsecase};
use java_code_analyzer::domain::document::DocumentFormat;
use java_code_analyzer::domain::{Ast, AstBuilder, ExprKind, MemberKind, NodeKind, StmtKind, TypeKind};
use java_code_analyzer::ports::dot_exporter::GraphConfig;
use java_code_analyzer::ports::pretty_printer::FormatConfig;
use java_code_analyzer::ports::{ArtifactExporter, ArtifactSink};

// ═══════════════════════════════════════════════════════════════════════════
// Synthetic Data Generators
// ═══════════════════════════════════════════════════════════════════════════

/// One class per `classes`, each with `methods` methods whose body holds an
/// if-statement and a call.
fn create_synthetic_unit(classes: usize, methods: usize) -> Ast {
    let none: [(&str, &str); 0] = [];
    let mut b = AstBuilder::new();
    let root = b.root();
    b.add(root, NodeKind::ImportDecl, [("name", "java.util.List")]);

    for c in 0..classes {
        let class = b.add(
            root,
            NodeKind::Type(TypeKind::Class),
            [("name", format!("Class{}", c)), ("modifiers", "public".to_string())],
        );
        for m in 0..methods {
            let method = b.add(class, NodeKind::Member(MemberKind::Method), [("name", format!("method{}", m))]);
            b.add(method, NodeKind::Parameter, [("type", "int"), ("name", "x")]);
            let body = b.add(method, NodeKind::Stmt(StmtKind::Block), none);

            let branch = b.add(body, NodeKind::Stmt(StmtKind::If), none);
            let cond = b.add(branch, NodeKind::Expr(ExprKind::Binary), [("operator", ">")]);
            b.add(cond, NodeKind::Expr(ExprKind::Name), [("name", "x")]);
            b.add(cond, NodeKind::Expr(ExprKind::Literal), [("value", "0")]);
            let ret = b.add(branch, NodeKind::Stmt(StmtKind::Return), none);
            b.add(ret, NodeKind::Expr(ExprKind::Name), [("name", "x")]);

            let stmt = b.add(body, NodeKind::Stmt(StmtKind::Expression), none);
            let call = b.add(stmt, NodeKind::Expr(ExprKind::MethodCall), [("name", "log")]);
            b.add(call, NodeKind::Expr(ExprKind::Name), [("name", "x")]);
        }
    }
    b.finish().expect("synthetic unit is well-formed")
}

/// Discards every artifact.
struct NullSink;

impl ArtifactSink for NullSink {
    fn write(&self, _name: &str, contents: &str) -> std::io::Result<()> {
        black_box(contents);
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Benchmarks
// ═══════════════════════════════════════════════════════════════════════════

fn bench_exporters(c: &mut Criterion) {
    let exporters = standard_exporters(FormatConfig::default(), GraphConfig::default(), DocumentFormat::Yaml);

    for &(classes, methods) in &[(10, 10), (50, 20)] {
        let ast = create_synthetic_unit(classes, methods);
        let mut group = c.benchmark_group(format!("export/{}x{}", classes, methods));
        group.throughput(Throughput::Elements(ast.len() as u64));

        for exporter in &exporters {
            group.bench_with_input(
                BenchmarkId::from_parameter(exporter.artifact()),
                &ast,
                |b, ast| b.iter(|| black_box(exporter.render(ast.root()).expect("render"))),
            );
        }
        group.finish();
    }
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(30);
    let ast = create_synthetic_unit(50, 20);

    for parallel in [false, true] {
        let usecase = AnalyzeUsecase::new(standard_exporters(
            FormatConfig::default(),
            GraphConfig::default(),
            DocumentFormat::Yaml,
        ))
        .parallel(parallel);
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_function(label, |b| b.iter(|| black_box(usecase.run(&ast, &NullSink))));
    }
    group.finish();
}

criterion_group!(benches, bench_exporters, bench_pipeline);
criterion_main!(benches);
