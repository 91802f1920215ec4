use criterion::{criterion_group, criterion_main, Criterion};
use dotfind::{detect, pseudo_accuracy, DetectParams, OwnedImage, Point};
use std::hint::black_box;

const RADIUS: u32 = 10;

/// Deterministic grid of outlined dots, the same rendering the
/// integration fixtures use.
fn make_dot_image(width: usize, height: usize, spacing: usize) -> (Vec<Point>, OwnedImage) {
    let mut centers = Vec::new();
    let mut y = 2 * RADIUS as usize;
    while y + 2 * (RADIUS as usize) < height {
        let mut x = 2 * RADIUS as usize;
        while x + 2 * (RADIUS as usize) < width {
            centers.push(Point::new(x as i32, y as i32));
            x += spacing;
        }
        y += spacing;
    }

    let mut data = vec![0u8; width * height];
    let r = RADIUS as f32;
    for center in &centers {
        for dy in -(RADIUS as i32 + 1)..=(RADIUS as i32 + 1) {
            for dx in -(RADIUS as i32 + 1)..=(RADIUS as i32 + 1) {
                let x = center.x + dx;
                let y = center.y + dy;
                let dist = ((dx * dx + dy * dy) as f32).sqrt();
                if dist <= r {
                    data[y as usize * width + x as usize] =
                        if dist > r - 1.0 { 255 } else { 127 };
                }
            }
        }
    }
    (centers, OwnedImage::from_vec(data, width, height).unwrap())
}

fn bench_detect(c: &mut Criterion) {
    let (_, image) = make_dot_image(512, 512, 64);
    let params = DetectParams::new(RADIUS);

    c.bench_function("detect_512x512", |b| {
        b.iter(|| detect(black_box(image.view()), black_box(&params)))
    });
}

fn bench_score(c: &mut Criterion) {
    let (centers, image) = make_dot_image(512, 512, 64);
    let detected = detect(image.view(), &DetectParams::new(RADIUS));

    c.bench_function("pseudo_accuracy", |b| {
        b.iter(|| pseudo_accuracy(black_box(&centers), black_box(&detected), RADIUS))
    });
}

criterion_group!(benches, bench_detect, bench_score);
criterion_main!(benches);
