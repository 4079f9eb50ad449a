//! Benchmark for one animation frame: tick, then draw into a pixel canvas.
//!
//! Run with: cargo bench --package wavefill_ui --bench frame_benchmark

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wavefill_core::{Color, PixelCanvas, ViewAttributes};
use wavefill_ui::WaveFillView;

const FRAME: Duration = Duration::from_micros(16_667);

fn benchmark_frame(c: &mut Criterion) {
    let side = 256;
    let mut view = WaveFillView::new(&ViewAttributes::default());
    view.on_size_changed(side, side);
    let mut canvas = PixelCanvas::new(side, side);

    c.bench_function("frame_composite_256", |b| {
        b.iter(|| {
            view.tick(FRAME);
            canvas.clear(Color::TRANSPARENT);
            view.draw(&mut canvas);
            black_box(canvas.pixmap().pixels().len())
        });
    });
}

criterion_group!(benches, benchmark_frame);
criterion_main!(benches);
