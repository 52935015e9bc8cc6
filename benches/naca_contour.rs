use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aerofoil_rs::contour::deform::{Deformation, IceShape};
use aerofoil_rs::contour::generate::Naca4Digit;

fn benchmark(c: &mut Criterion) {
    let naca = Naca4Digit::new(0.02, 0.4, 0.12, 1.0, 200).expect("valid parameters");
    c.bench_function("NACA4 contour generation", |b| {
        b.iter(|| black_box(&naca).contour("bench"))
    });

    let contour = naca.contour("bench");
    let ice = Deformation::Ice {
        max_thickness: 0.02,
        shape: IceShape::Gaussian,
        zone: (0.3, 0.45),
    };
    c.bench_function("Ice accretion", |b| {
        b.iter(|| ice.apply(black_box(&contour)).unwrap())
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
