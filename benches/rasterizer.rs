use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use airframe::bench::{
    EdgeFunctionRasterizer, FrameBuffer, Rasterizer, ScanlineRasterizer, Triangle, Vertex,
};
use airframe::colors::{self, Color};
use airframe::math::vec4::Vec4;
use airframe::prelude::*;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn triangle(points: [(f32, f32, f32); 3]) -> Triangle {
    let colors = [
        Color::new(1.0, 0.0, 0.0),
        Color::new(0.0, 1.0, 0.0),
        Color::new(0.0, 0.0, 1.0),
    ];
    let mut i = 0;
    Triangle::new(points.map(|(x, y, z)| {
        let vertex = Vertex::new(Vec4::point(x, y, z), colors[i]);
        i += 1;
        vertex
    }))
}

fn small_triangle() -> Triangle {
    triangle([(100.0, 100.0, 0.1), (120.0, 100.0, 0.2), (110.0, 120.0, 0.3)])
}

fn medium_triangle() -> Triangle {
    triangle([(100.0, 100.0, 0.1), (300.0, 100.0, 0.5), (200.0, 300.0, 0.9)])
}

fn large_triangle() -> Triangle {
    triangle([(50.0, 50.0, -0.5), (750.0, 100.0, 0.0), (400.0, 550.0, 0.5)])
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let scanline = ScanlineRasterizer::new();
    let edge_fn = EdgeFunctionRasterizer::new();

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("scanline", name), &triangle, |b, tri| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                fb.clear(colors::BACKGROUND);
                scanline.fill_triangle(black_box(tri), &mut fb);
            });
        });

        group.bench_with_input(
            BenchmarkId::new("edge_function", name),
            &triangle,
            |b, tri| {
                let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
                b.iter(|| {
                    fb.clear(colors::BACKGROUND);
                    edge_fn.fill_triangle(black_box(tri), &mut fb);
                });
            },
        );
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    let scanline = ScanlineRasterizer::new();
    let edge_fn = EdgeFunctionRasterizer::new();

    // Grid of small overlapping triangles at varying depth
    let triangles: Vec<Triangle> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                let z = ((row + col) % 7) as f32 * 0.1;
                triangle([(x, y, z), (x + 45.0, y, z), (x + 22.5, y + 35.0, z)])
            })
        })
        .collect();

    group.bench_function("scanline_400_triangles", |b| {
        let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            fb.clear(colors::BACKGROUND);
            for tri in &triangles {
                scanline.fill_triangle(black_box(tri), &mut fb);
            }
        });
    });

    group.bench_function("edge_function_400_triangles", |b| {
        let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            fb.clear(colors::BACKGROUND);
            for tri in &triangles {
                edge_fn.fill_triangle(black_box(tri), &mut fb);
            }
        });
    });

    group.finish();
}

fn benchmark_demo_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("demo_frame");

    for rasterizer in [RasterizerType::EdgeFunction, RasterizerType::Scanline] {
        group.bench_function(BenchmarkId::new("airplane", rasterizer), |b| {
            let scene = demo::airplane_scene(Mesh::cube()).expect("demo scene");
            let mut engine = Engine::new(scene, demo::ANCHOR, WINDOW_WIDTH, WINDOW_HEIGHT);
            engine.set_rasterizer(rasterizer);
            let input = InputState::default();
            b.iter(|| engine.frame(black_box(&input)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_demo_frame
);
criterion_main!(benches);
