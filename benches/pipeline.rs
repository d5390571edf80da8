use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stroke_raster::{
    fit_view_box, rasterize, Drawing, FitViewBoxOptions, RasterOptions, Rasterizer, Stroke,
};

/// A handwriting-sized drawing: a few strokes of a few dozen points each.
fn sample_drawing() -> Drawing {
    let mut d = Drawing::new();
    for s in 0..6 {
        let phase = s as f64 * 0.7;
        let mut stroke = Stroke::default();
        for i in 0..40 {
            let t = i as f64 / 39.0;
            stroke.push(
                120.0 * t + 15.0 * (6.0 * t + phase).sin(),
                60.0 + 40.0 * (4.0 * t + phase).cos() + s as f64 * 8.0,
            );
        }
        d.push_stroke(stroke);
    }
    d
}

fn normalized_drawing() -> Drawing {
    let mut d = sample_drawing();
    let opts = FitViewBoxOptions::square(27.0)
        .preserve_aspect_ratio(true)
        .center(true);
    fit_view_box(&mut d, &opts).expect("sample drawing has a non-degenerate extent");
    d
}

fn bench_fit_view_box(c: &mut Criterion) {
    let base = sample_drawing();
    let opts = FitViewBoxOptions::square(28.0).preserve_aspect_ratio(true);
    c.bench_function("fit_view_box", |b| {
        b.iter(|| {
            let mut d = base.clone();
            let _ = fit_view_box(black_box(&mut d), black_box(&opts));
            d
        })
    });
}

fn bench_rasterize(c: &mut Criterion) {
    let d = normalized_drawing();
    let opts = RasterOptions::new(28, 28).line_width(1.5);

    c.bench_function("rasterize_fresh", |b| {
        b.iter(|| rasterize(black_box(&d), black_box(&opts)))
    });

    let mut r = Rasterizer::new();
    c.bench_function("rasterize_reused", |b| {
        b.iter(|| r.render(black_box(&d), black_box(&opts)))
    });
}

criterion_group!(benches, bench_fit_view_box, bench_rasterize);
criterion_main!(benches);
